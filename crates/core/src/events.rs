//! Events module - notifications from the engine to its host
//!
//! The engine never calls into presentation code. Every state change is
//! recorded as a [`GameEvent`] in an internal queue which the host drains
//! after each command, either directly or through an [`EventSink`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::snapshot::{FieldSnapshot, PieceSnapshot};

/// Domain event emitted by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Grid copy with the falling piece overlaid
    FieldUpdated(FieldSnapshot),
    NextPieceUpdated(PieceSnapshot),
    ScoreUpdated(u32),
    LevelUpdated(u32),
    /// Running total of cleared lines
    LinesUpdated(u32),
    /// Row indices before removal, bottom to top
    LinesCleared(Vec<usize>),
    PieceLocked,
    GameOver,
    GravityIntervalChanged(Duration),
    PauseToggled(bool),
}

impl GameEvent {
    /// Short stable name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::FieldUpdated(_) => "fieldUpdated",
            GameEvent::NextPieceUpdated(_) => "nextPieceUpdated",
            GameEvent::ScoreUpdated(_) => "scoreUpdated",
            GameEvent::LevelUpdated(_) => "levelUpdated",
            GameEvent::LinesUpdated(_) => "linesUpdated",
            GameEvent::LinesCleared(_) => "linesCleared",
            GameEvent::PieceLocked => "pieceLocked",
            GameEvent::GameOver => "gameOver",
            GameEvent::GravityIntervalChanged(_) => "gravityIntervalChanged",
            GameEvent::PauseToggled(_) => "pauseToggled",
        }
    }
}

/// Observer receiving engine events in emission order
pub trait EventSink {
    fn on_event(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn on_event(&mut self, event: GameEvent) {
        self.push(event);
    }
}

impl<F: FnMut(GameEvent)> EventSink for F {
    fn on_event(&mut self, event: GameEvent) {
        self(event)
    }
}
