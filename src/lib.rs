//! Tile cascade (workspace facade crate).
//!
//! Re-exports the engine and front-end crates under one name so binaries,
//! benches and integration tests can use `tile_cascade::{core, input, term, types}`.

pub mod cli;

pub use tile_cascade_core as core;
pub use tile_cascade_input as input;
pub use tile_cascade_term as term;
pub use tile_cascade_types as types;
