//! Scoring module - classic line-clear points, level rule and gravity timing
//!
//! Line clears pay `LINE_SCORE_BASE[lines - 1] * (level + 1)`. Soft drops pay
//! one point per soft-drop command at lock time. Hard drops pay nothing under
//! the default [`HardDropScoring::None`] policy.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{FRAMES_PER_SECOND, LEVEL_SPEED_FRAMES, LINES_PER_LEVEL, LINE_SCORE_BASE};

/// How hard drops are scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardDropScoring {
    /// No bonus (classic behaviour)
    #[default]
    None,
    /// Points per row descended
    PerCell(u32),
}

impl HardDropScoring {
    /// Points for a hard drop that descended `rows`
    pub fn award(self, rows: u32) -> u32 {
        match self {
            HardDropScoring::None => 0,
            HardDropScoring::PerCell(points) => points.saturating_mul(rows),
        }
    }
}

/// Calculate line clear score
/// lines: number of lines cleared at once (more than 4 pays the 4-line tier)
/// level: level before the clear
pub fn line_clear_award(lines: usize, level: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let tier = lines.min(LINE_SCORE_BASE.len()) - 1;
    LINE_SCORE_BASE[tier].saturating_mul(level.saturating_add(1))
}

/// Level reached after clearing `total_lines`, never below `start_level`
pub fn level_for_lines(total_lines: u32, start_level: u32) -> u32 {
    (total_lines / LINES_PER_LEVEL).max(start_level)
}

/// Frames per gravity step; levels past the table reuse the last entry
pub fn speed_frames(level: u32) -> u32 {
    let idx = (level as usize).min(LEVEL_SPEED_FRAMES.len() - 1);
    LEVEL_SPEED_FRAMES[idx]
}

/// Gravity interval in milliseconds (fractional)
pub fn gravity_interval_ms(level: u32) -> f64 {
    speed_frames(level) as f64 / FRAMES_PER_SECOND * 1000.0
}

/// Gravity interval for a level
pub fn gravity_interval(level: u32) -> Duration {
    Duration::from_secs_f64(speed_frames(level) as f64 / FRAMES_PER_SECOND)
}
