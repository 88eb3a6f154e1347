//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data (`Copy` where possible) with no behaviour beyond
//! parsing and small geometric helpers, making them usable in any context
//! (engine logic, terminal rendering, JSON export).
//!
//! # Board Dimensions
//!
//! The default playfield is a 6x6 grid:
//!
//! - **Rows**: indexed 0-5, row 0 is the top
//! - **Columns**: indexed 0-5, column 0 is the left edge
//! - **Gravity**: tiles fall toward the highest row index, refills enter at row 0
//!
//! # Rule Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_MATCH_LEN` | 3 | Shortest run that counts as a match |
//! | `SCORE_PER_TILE` | 10 | Points per removed tile, multiplied by the chain index |
//! | `CURRENCY_DIVISOR` | 3 | One coin per three removed tiles (floored) |
//! | `GENERATION_ATTEMPTS` | 30 | Random draws tried per cell before the fallback scan |
//! | `DEFAULT_MIN_SPECIAL_RUN` | 4 | Straight run length that earns a special tile |
//! | `DEFAULT_STRONG_SPECIAL_RUN` | 5 | Straight run length that earns the strong tier |
//! | `DEFAULT_MAX_CASCADE_ITERATIONS` | 100 | Guard rail for a runaway cascade |
//!
//! # Presentation Pacing
//!
//! Timing values are in milliseconds and only matter to front ends:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval (~60 FPS) |
//! | `REMOVE_PAUSE_MS` | 260 | Time removed cells stay highlighted |
//! | `CASCADE_PAUSE_MS` | 90 | Pause between two cascade iterations |
//! | `SHIFT_SNAP_MS` | 150 | Line snap animation after a shift |
//! | `ROUND_SECONDS` | 140 | Length of a timed round |
//!
//! # Examples
//!
//! ```
//! use tile_cascade_types::{Axis, Move, Pos, SpecialEffect, TileKind};
//!
//! // Parse a tile kind from its id (case-insensitive)
//! let kind = TileKind::from_str("Cola").unwrap();
//! assert_eq!(kind, TileKind::Cola);
//! assert!(kind.is_special());
//! assert_eq!(kind.special_effect(), SpecialEffect::Area3x3);
//!
//! // Ordinary tiles carry no effect
//! assert_eq!(TileKind::Burger.special_effect(), SpecialEffect::None);
//!
//! // Build player moves
//! let swap = Move::swap(Pos::new(1, 3), Pos::new(2, 3));
//! let shift = Move::shift(Axis::Row, 2, 1, Pos::new(2, 0));
//! assert_ne!(swap, shift);
//! ```

use serde::{Deserialize, Serialize};

/// Default number of rows (6)
pub const DEFAULT_ROWS: usize = 6;

/// Default number of columns (6)
pub const DEFAULT_COLS: usize = 6;

/// Shortest same-kind run that counts as a match
pub const MIN_MATCH_LEN: usize = 3;

/// Points per removed tile, multiplied by the chain index
pub const SCORE_PER_TILE: u32 = 10;

/// Removed tiles per coin
pub const CURRENCY_DIVISOR: u32 = 3;

/// Random draws attempted per cell while generating a board
pub const GENERATION_ATTEMPTS: u32 = 30;

/// Straight run length that creates a special tile
pub const DEFAULT_MIN_SPECIAL_RUN: usize = 4;

/// Straight run length that creates a strong-tier special tile
pub const DEFAULT_STRONG_SPECIAL_RUN: usize = 5;

/// Cascade iterations allowed for a single move before the engine faults
pub const DEFAULT_MAX_CASCADE_ITERATIONS: u32 = 100;

/// Frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Time removed cells stay highlighted before they are cleared
pub const REMOVE_PAUSE_MS: u32 = 260;

/// Pause between two cascade iterations
pub const CASCADE_PAUSE_MS: u32 = 90;

/// Line snap animation after a committed shift
pub const SHIFT_SNAP_MS: u32 = 150;

/// Length of a timed round (2 minutes 20 seconds)
pub const ROUND_SECONDS: u32 = 140;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_constants_match_reference_game() {
        assert_eq!(DEFAULT_ROWS, 6);
        assert_eq!(DEFAULT_COLS, 6);
        assert_eq!(MIN_MATCH_LEN, 3);
        assert_eq!(SCORE_PER_TILE, 10);
        assert_eq!(CURRENCY_DIVISOR, 3);
        assert_eq!(GENERATION_ATTEMPTS, 30);
        assert_eq!(ROUND_SECONDS, 140);
        assert_eq!(REMOVE_PAUSE_MS, 260);
        assert_eq!(CASCADE_PAUSE_MS, 90);
    }

    #[test]
    fn tile_kind_ids_roundtrip() {
        for kind in TileKind::ALL {
            assert_eq!(TileKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(TileKind::from_str("pizza"), None);
    }

    #[test]
    fn only_boosters_are_special() {
        let specials: Vec<TileKind> = TileKind::ALL
            .into_iter()
            .filter(|k| k.is_special())
            .collect();
        assert_eq!(specials, vec![TileKind::Cola, TileKind::Shake]);
    }

    #[test]
    fn pos_manhattan_distance() {
        assert_eq!(Pos::new(0, 0).manhattan(Pos::new(2, 3)), 5);
        assert_eq!(Pos::new(4, 1).manhattan(Pos::new(1, 4)), 6);
        assert_eq!(Pos::new(3, 3).manhattan(Pos::new(3, 3)), 0);
    }
}

/// Tile kinds that can occupy a board cell
///
/// Ordinary kinds are drawn at random; special kinds ("boosters") only appear
/// as match rewards:
/// - **Burger**, **Brownie**, **Chicken**, **Roll**, **Fries**, **Sauce**: ordinary
/// - **Cola**: special, clears the 3x3 area around itself when matched
/// - **Shake**: special, clears its whole row when matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Burger,
    Brownie,
    Chicken,
    Roll,
    Fries,
    Sauce,
    Cola,
    Shake,
}

impl TileKind {
    /// Every kind, ordinary kinds first
    pub const ALL: [TileKind; 8] = [
        TileKind::Burger,
        TileKind::Brownie,
        TileKind::Chicken,
        TileKind::Roll,
        TileKind::Fries,
        TileKind::Sauce,
        TileKind::Cola,
        TileKind::Shake,
    ];

    /// The six ordinary kinds
    pub const ORDINARY: [TileKind; 6] = [
        TileKind::Burger,
        TileKind::Brownie,
        TileKind::Chicken,
        TileKind::Roll,
        TileKind::Fries,
        TileKind::Sauce,
    ];

    /// Parse tile kind from its id (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_cascade_types::TileKind;
    ///
    /// assert_eq!(TileKind::from_str("burger"), Some(TileKind::Burger));
    /// assert_eq!(TileKind::from_str("SHAKE"), Some(TileKind::Shake));
    /// assert_eq!(TileKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "burger" => Some(TileKind::Burger),
            "brownie" => Some(TileKind::Brownie),
            "chicken" => Some(TileKind::Chicken),
            "roll" => Some(TileKind::Roll),
            "fries" => Some(TileKind::Fries),
            "sauce" => Some(TileKind::Sauce),
            "cola" => Some(TileKind::Cola),
            "shake" => Some(TileKind::Shake),
            _ => None,
        }
    }

    /// Convert to lowercase id
    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Burger => "burger",
            TileKind::Brownie => "brownie",
            TileKind::Chicken => "chicken",
            TileKind::Roll => "roll",
            TileKind::Fries => "fries",
            TileKind::Sauce => "sauce",
            TileKind::Cola => "cola",
            TileKind::Shake => "shake",
        }
    }

    /// Whether this kind is a booster created from matches
    pub fn is_special(&self) -> bool {
        self.special_effect() != SpecialEffect::None
    }

    /// Effect triggered when this tile is removed by a match
    pub fn special_effect(&self) -> SpecialEffect {
        match self {
            TileKind::Cola => SpecialEffect::Area3x3,
            TileKind::Shake => SpecialEffect::ClearLine,
            _ => SpecialEffect::None,
        }
    }
}

/// Secondary removal triggered by a special tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialEffect {
    /// Ordinary tile, no effect
    None,
    /// Removes the 3x3 neighbourhood centred on the tile, clipped to the board
    Area3x3,
    /// Removes every cell in the tile's row
    ClearLine,
}

impl SpecialEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialEffect::None => "none",
            SpecialEffect::Area3x3 => "area3x3",
            SpecialEffect::ClearLine => "clear_line",
        }
    }
}

/// Reward tier of a created special tile
///
/// - **Medium**: straight run of the minimum special length (4)
/// - **Strong**: longer straight run (5+) or an L/T intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialTier {
    Medium,
    Strong,
}

/// A cell on the game board
///
/// - `None`: Empty cell (only observable mid-cascade)
/// - `Some(TileKind)`: Cell occupied by a tile of that kind
pub type Cell = Option<TileKind>;

/// Board coordinate, ordered row-major
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two cells
    pub fn manhattan(self, other: Pos) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// Line orientation targeted by a shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Row,
    Col,
}

impl Axis {
    /// Parse axis from string: "row" | "r", "col" | "column" | "c"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "row" | "r" => Some(Axis::Row),
            "col" | "column" | "c" => Some(Axis::Col),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Row => "row",
            Axis::Col => "col",
        }
    }
}

/// Direction of a detected run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchDirection {
    Horizontal,
    Vertical,
}

/// A single player action
///
/// Moves are produced by an input collaborator (keyboard, pointer drag, AI)
/// and consumed once by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Move {
    /// Cyclic rotation of one full row or column by one cell.
    ///
    /// `delta = +1` moves every tile toward the higher index (right/down) with
    /// wraparound, `-1` the reverse. `anchor` is the drag origin and must lie
    /// on the shifted line.
    Shift {
        axis: Axis,
        index: usize,
        delta: i8,
        anchor: Pos,
    },
    /// Exchange of two cells. `b` is the destination endpoint, `a` the source.
    Swap { a: Pos, b: Pos },
}

impl Move {
    pub fn swap(a: Pos, b: Pos) -> Self {
        Move::Swap { a, b }
    }

    pub fn shift(axis: Axis, index: usize, delta: i8, anchor: Pos) -> Self {
        Move::Shift {
            axis,
            index,
            delta,
            anchor,
        }
    }

    /// The move that undoes this one
    pub fn inverse(&self) -> Self {
        match *self {
            Move::Shift {
                axis,
                index,
                delta,
                anchor,
            } => Move::Shift {
                axis,
                index,
                delta: -delta,
                anchor,
            },
            Move::Swap { a, b } => Move::Swap { a, b },
        }
    }

    pub fn is_swap(&self) -> bool {
        matches!(self, Move::Swap { .. })
    }
}

/// Front-end actions produced by the key map
///
/// Cursor and selection actions are turned into [`Move`]s by the input crate;
/// the engine never sees them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    /// Pick up (or drop) the tile under the cursor
    Select,
    /// Drop the current selection
    Cancel,
    /// Rotate the cursor's row toward the left
    ShiftLeft,
    /// Rotate the cursor's row toward the right
    ShiftRight,
    /// Rotate the cursor's column upward
    ShiftUp,
    /// Rotate the cursor's column downward
    ShiftDown,
    Pause,
    Restart,
}
