//! Terminal front end.
//!
//! Renders engine snapshots into a framebuffer of styled glyphs and flushes
//! that framebuffer to a terminal with crossterm. Only changed runs are
//! written after the first frame.
//!
//! The view is pure: [`GameView`] turns a
//! [`GameSnapshot`](core::GameSnapshot) into a [`FrameBuffer`] without I/O,
//! so it can be unit-tested.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blocktris_core as core;
pub use blocktris_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{format_play_time, GameView, Hud, Viewport};
pub use renderer::{changed_runs, encode_diff, encode_full, TerminalRenderer};
