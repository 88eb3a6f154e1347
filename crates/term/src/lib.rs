//! Terminal front end for the tile cascade game.
//!
//! Renders into a plain character framebuffer instead of a widget toolkit, so
//! the board keeps a fixed cell aspect and the view stays testable without a
//! terminal. Only `renderer` performs I/O.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tile_cascade_core as core;
pub use tile_cascade_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{tile_glyph, AnchorY, GameView, PlayView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
