//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::GameAction`] and turns those actions into engine
//! [`crate::types::Move`]s through a cursor-and-selection handler:
//!
//! - arrows / `hjkl` move the cursor
//! - space or enter picks up the tile under the cursor; the next arrow swaps it
//!   with its neighbour in that direction
//! - shift+arrows / `HJKL` rotate the cursor's row or column by one

pub mod handler;
pub mod map;

pub use tile_cascade_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, should_quit};
