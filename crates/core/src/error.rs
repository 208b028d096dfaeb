//! Error types for engine construction.
//!
//! Gameplay never produces errors: blocked moves and rotations are reported
//! as `false`, and a blocked spawn ends the session. Only building an engine
//! from bad parameters can fail.

use std::fmt;

use crate::types::{MAX_FIELD_DIMENSION, MIN_FIELD_HEIGHT, MIN_FIELD_WIDTH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Field cannot host a spawned piece
    FieldTooSmall { height: usize, width: usize },
    /// Field exceeds the supported dimension
    FieldTooLarge { height: usize, width: usize },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::FieldTooSmall { height, width } => write!(
                f,
                "field {}x{} is too small (minimum {}x{})",
                height, width, MIN_FIELD_HEIGHT, MIN_FIELD_WIDTH
            ),
            EngineError::FieldTooLarge { height, width } => write!(
                f,
                "field {}x{} is too large (maximum {} per side)",
                height, width, MAX_FIELD_DIMENSION
            ),
        }
    }
}

impl std::error::Error for EngineError {}
