//! Terminal input mapping.
//!
//! Maps `crossterm` key events into engine [`Command`](types::Command)s plus
//! the few host-level requests (new game, quit) that the engine does not
//! know about. Key repeat is left to the terminal.

pub mod map;

pub use blocktris_types as types;

pub use map::{handle_key_event, should_quit, KeyAction};
