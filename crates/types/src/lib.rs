//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic, so they can be used by the
//! engine, the terminal host and the input mapping alike.
//!
//! # Field Dimensions
//!
//! The reference playfield is 23 rows x 12 columns including its border:
//!
//! - **Walls**: column 0 and column `width - 1` hold [`WALL`]
//! - **Floor**: row `height - 1` holds [`FLOOR`]
//! - **Interior**: rows `0..height-1`, columns `1..width-1` (22 x 10)
//!
//! # Cell Values
//!
//! | Value | Meaning |
//! |-------|---------|
//! | `0` | empty playable cell |
//! | `-1` | wall sentinel |
//! | `-2` | floor sentinel |
//! | `1..=7` | locked cell of that [`Shape`] |
//!
//! # Gravity
//!
//! Gravity follows the Game Boy frame table: a piece falls one row every
//! `LEVEL_SPEED_FRAMES[level]` frames at [`FRAMES_PER_SECOND`].
//!
//! | Level | Frames | Interval |
//! |-------|--------|----------|
//! | 0 | 53 | ~887ms |
//! | 5 | 33 | ~552ms |
//! | 10 | 10 | ~167ms |
//! | 20+ | 3 | ~50ms |
//!
//! # Examples
//!
//! ```
//! use blocktris_types::{Command, MoveDirection, RotationDirection, Shape};
//!
//! // Shape identities double as cell values
//! assert_eq!(Shape::T.value(), 6);
//! assert_eq!(Shape::from_value(6), Some(Shape::T));
//!
//! // Commands parse from their wire names
//! let cmd = Command::from_str("rotateCcw").unwrap();
//! assert_eq!(cmd, Command::Rotate(RotationDirection::CounterClockwise));
//! assert_eq!(Command::Move(MoveDirection::Left).as_str(), "moveLeft");
//! ```

use serde::{Deserialize, Serialize};

/// Value stored in a single playfield cell.
pub type Cell = i8;

/// Empty playable cell
pub const EMPTY: Cell = 0;

/// Left/right wall sentinel
pub const WALL: Cell = -1;

/// Floor sentinel
pub const FLOOR: Cell = -2;

/// Reference field height, floor row included
pub const DEFAULT_FIELD_HEIGHT: usize = 23;

/// Reference field width, both walls included
pub const DEFAULT_FIELD_WIDTH: usize = 12;

/// Smallest accepted field height (floor plus room for a vertical I)
pub const MIN_FIELD_HEIGHT: usize = 5;

/// Smallest accepted field width (two walls plus a horizontal I)
pub const MIN_FIELD_WIDTH: usize = 6;

/// Largest accepted field dimension
pub const MAX_FIELD_DIMENSION: usize = 64;

/// Line clear base points for 1, 2, 3 and 4 simultaneous lines (classic rules)
pub const LINE_SCORE_BASE: [u32; 4] = [40, 100, 300, 1200];

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Frames per gravity step, indexed by level (Game Boy timing)
pub const LEVEL_SPEED_FRAMES: [u32; 21] = [
    53, 49, 45, 41, 37, 33, 28, 22, 17, 11, 10, 9, 8, 7, 6, 6, 5, 5, 4, 4, 3,
];

/// Frame rate of the reference hardware
pub const FRAMES_PER_SECOND: f64 = 59.73;

/// The seven tetromino identities.
///
/// The discriminant is the value written into the playfield when a piece of
/// this shape locks, and the key renderers use to pick a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum Shape {
    I = 1,
    J = 2,
    L = 3,
    O = 4,
    S = 5,
    T = 6,
    Z = 7,
}

impl Shape {
    /// All shapes in identity order
    pub const ALL: [Shape; 7] = [
        Shape::I,
        Shape::J,
        Shape::L,
        Shape::O,
        Shape::S,
        Shape::T,
        Shape::Z,
    ];

    /// Numeric identity (1-7)
    pub fn value(self) -> Cell {
        self as Cell
    }

    /// Look up a shape by its numeric identity
    pub fn from_value(value: Cell) -> Option<Self> {
        match value {
            1 => Some(Shape::I),
            2 => Some(Shape::J),
            3 => Some(Shape::L),
            4 => Some(Shape::O),
            5 => Some(Shape::S),
            6 => Some(Shape::T),
            7 => Some(Shape::Z),
            _ => None,
        }
    }

    /// Number of distinct rotation states
    pub fn rotation_states(self) -> u8 {
        match self {
            Shape::O => 1,
            Shape::I | Shape::S | Shape::Z => 2,
            Shape::J | Shape::L | Shape::T => 4,
        }
    }

    /// Row of the spawn cursor; the I pattern carries its cells one row lower
    pub fn spawn_row(self) -> i32 {
        match self {
            Shape::I => -2,
            _ => -1,
        }
    }

    /// Parse shape from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(Shape::I),
            "j" => Some(Shape::J),
            "l" => Some(Shape::L),
            "o" => Some(Shape::O),
            "s" => Some(Shape::S),
            "t" => Some(Shape::T),
            "z" => Some(Shape::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::I => "i",
            Shape::J => "j",
            Shape::L => "l",
            Shape::O => "o",
            Shape::S => "s",
            Shape::T => "t",
            Shape::Z => "z",
        }
    }
}

/// Rotation direction for a rotate command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// Step applied to the rotation index
    pub fn step(self) -> i8 {
        match self {
            RotationDirection::Clockwise => 1,
            RotationDirection::CounterClockwise => -1,
        }
    }
}

/// Translation direction for a move command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveDirection {
    Left,
    Right,
    Down,
}

impl MoveDirection {
    /// (row, column) offset of a single step
    pub fn offset(self) -> (i32, i32) {
        match self {
            MoveDirection::Left => (0, -1),
            MoveDirection::Right => (0, 1),
            MoveDirection::Down => (1, 0),
        }
    }
}

/// Host-to-engine commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Move(MoveDirection),
    Rotate(RotationDirection),
    HardDrop,
    TogglePause,
    GravityTick,
}

impl Command {
    /// Parse command from its wire name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::Move(MoveDirection::Left)),
            "moveright" => Some(Command::Move(MoveDirection::Right)),
            "movedown" | "softdrop" => Some(Command::Move(MoveDirection::Down)),
            "rotatecw" => Some(Command::Rotate(RotationDirection::Clockwise)),
            "rotateccw" => Some(Command::Rotate(RotationDirection::CounterClockwise)),
            "harddrop" => Some(Command::HardDrop),
            "pause" | "togglepause" => Some(Command::TogglePause),
            "tick" | "gravitytick" => Some(Command::GravityTick),
            _ => None,
        }
    }

    /// Convert to wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Move(MoveDirection::Left) => "moveLeft",
            Command::Move(MoveDirection::Right) => "moveRight",
            Command::Move(MoveDirection::Down) => "moveDown",
            Command::Rotate(RotationDirection::Clockwise) => "rotateCw",
            Command::Rotate(RotationDirection::CounterClockwise) => "rotateCcw",
            Command::HardDrop => "hardDrop",
            Command::TogglePause => "togglePause",
            Command::GravityTick => "gravityTick",
        }
    }
}
