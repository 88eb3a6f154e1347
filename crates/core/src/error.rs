//! Error types for engine construction and cascade faults.
//!
//! Invalid player moves are not errors: they come back as
//! [`MoveRejection`] inside a move status and leave the board untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Axis, Pos, TileKind};

/// Fatal engine errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Configuration or an injected board names a kind the catalog does not register
    #[error("unknown tile kind {kind:?} for {role}")]
    UnknownTileKind { kind: TileKind, role: &'static str },

    /// The catalog has nothing to draw from
    #[error("tile catalog has no ordinary kinds")]
    EmptyCatalog,

    /// Zero-sized board, or injected contents that disagree with the config
    #[error("invalid board dimensions {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    /// A numeric setting outside its usable range
    #[error("invalid {setting}: {reason}")]
    InvalidSetting {
        setting: &'static str,
        reason: &'static str,
    },

    /// Refills kept producing matches past the iteration cap
    #[error("cascade did not settle within {limit} iterations")]
    CascadeDidNotTerminate { limit: u32 },
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Why a move was refused before touching the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum MoveRejection {
    #[error("cell {pos:?} is outside the board")]
    OutOfBounds { pos: Pos },

    #[error("{axis:?} {index} is outside the board")]
    LineOutOfRange { axis: Axis, index: usize },

    #[error("shift delta must be -1 or +1, got {delta}")]
    InvalidDelta { delta: i8 },

    #[error("shift anchor {anchor:?} is not on the shifted line")]
    AnchorOffLine { anchor: Pos },

    #[error("a cascade is still resolving")]
    Busy,
}
