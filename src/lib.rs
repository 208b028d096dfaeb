//! Blocktris (workspace facade crate).
//!
//! Re-exports the member crates under short names and adds the host-side
//! pieces that sit between the engine and a terminal:
//!
//! - [`config`]: JSON config file plus environment overrides
//! - [`driver`]: gravity clock, play timer and the [`driver::Session`] glue

pub mod config;
pub mod driver;

pub use blocktris_core as core;
pub use blocktris_input as input;
pub use blocktris_term as term;
pub use blocktris_types as types;
