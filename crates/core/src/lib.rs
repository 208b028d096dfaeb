//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the game and the session state machine.
//! It has no dependency on terminals, timers or input devices: the host feeds
//! it [`Command`](types::Command)s and gravity ticks and reads back
//! [`GameEvent`]s and snapshots.
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven shapes and their rotation tables
//! - [`playfield`]: bordered grid with collision, merge and line removal
//! - [`scoring`]: line-clear awards, level rule and gravity intervals
//! - [`rng`]: seedable uniform shape source
//! - [`events`]: engine-to-host notifications
//! - [`engine`]: the session state machine
//! - [`snapshot`]: owned copies of engine state
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every shape is drawn independently
//! - **Kick-free rotation**: a rotation that collides is simply rejected
//! - **Immediate lock**: a piece locks as soon as a downward step is blocked
//! - **Classic scoring**: 40/100/300/1200 times `level + 1`, plus one point
//!   per soft-drop command
//! - **Levels**: one level per 10 cleared lines
//!
//! # Example
//!
//! ```
//! use blocktris_core::{EngineConfig, GameEngine, GameEvent};
//! use blocktris_core::types::{Command, MoveDirection};
//!
//! let mut game = GameEngine::new(EngineConfig::default()).unwrap();
//! game.start();
//!
//! game.apply(Command::Move(MoveDirection::Down));
//! game.apply(Command::HardDrop);
//!
//! // One soft drop, paid when the piece locked
//! assert_eq!(game.score(), 1);
//! assert!(game
//!     .drain_events()
//!     .iter()
//!     .any(|e| matches!(e, GameEvent::PieceLocked)));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod pieces;
pub mod playfield;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blocktris_types as types;

// Re-export commonly used types for convenience
pub use config::EngineConfig;
pub use engine::{GameEngine, Phase};
pub use error::EngineError;
pub use events::{EventSink, GameEvent};
pub use pieces::{pattern, CellPattern, Piece};
pub use playfield::{Cursor, Playfield};
pub use rng::{ScriptedShapes, ShapeSource, SimpleRng, UniformShapes};
pub use scoring::{gravity_interval, level_for_lines, line_clear_award, HardDropScoring};
pub use snapshot::{ActiveSnapshot, FieldSnapshot, GameSnapshot, PieceSnapshot};
