//! Snapshot module - owned copies of engine state handed to the host
//!
//! Hosts never borrow live engine state. Every event payload and every
//! `GameEngine::snapshot` call produces an independent copy, so a renderer
//! can hold on to it while the engine keeps mutating.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::pieces::Piece;
use crate::playfield::Cursor;
use crate::types::{Cell, Shape, EMPTY, FLOOR, WALL};

/// Copy of the playfield grid (optionally with the falling piece merged in)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSnapshot {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl FieldSnapshot {
    pub fn new(height: usize, width: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), height * width);
        Self {
            height,
            width,
            cells,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Cell at (row, col); `None` outside the grid
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.cells[row * self.width + col])
    }

    /// Iterate rows as slices
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Flat row-major cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells holding a shape value
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c > 0).count()
    }
}

/// Text dump: walls `|`, floor `=`, empty `.`, locked cells by shape value
impl fmt::Display for FieldSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.rows().enumerate() {
            for &cell in row {
                let ch = match cell {
                    EMPTY => '.',
                    WALL => '|',
                    FLOOR => '=',
                    v => Shape::from_value(v)
                        .map(|s| s.as_str().to_ascii_uppercase().chars().next().unwrap_or('#'))
                        .unwrap_or('#'),
                };
                write!(f, "{}", ch)?;
            }
            if r + 1 < self.height {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Copy of a piece with its pattern materialized
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub shape: Shape,
    pub rotation: u8,
    pub pattern: Vec<Vec<Cell>>,
}

impl From<Piece> for PieceSnapshot {
    fn from(piece: Piece) -> Self {
        Self {
            shape: piece.shape(),
            rotation: piece.rotation(),
            pattern: piece.pattern().to_rows(),
        }
    }
}

/// Falling piece and its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub piece: Piece,
    pub cursor: Cursor,
}

/// Complete copy of a session's observable state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Grid with the falling piece overlaid
    pub field: FieldSnapshot,
    pub active: Option<ActiveSnapshot>,
    pub next: PieceSnapshot,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub soft_drops: u32,
    pub paused: bool,
    pub game_over: bool,
    pub gravity_interval: Duration,
}

impl GameSnapshot {
    /// Whether commands would currently be accepted
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused && self.active.is_some()
    }
}
