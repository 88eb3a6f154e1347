//! Core engine module - pure, deterministic, and testable
//!
//! This crate holds the rules of the tile cascade game: board generation, match
//! detection, move resolution, special tiles and scoring. It has **zero
//! dependencies** on terminal I/O, making it:
//!
//! - **Deterministic**: the same seed and moves produce the same game
//! - **Testable**: every rule is reachable through small pure functions
//! - **Portable**: runs behind the terminal front end or headless
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size tile grid with generation, gravity, refill, shift and swap
//! - [`catalog`]: registry of ordinary and special tile kinds
//! - [`config`]: explicit per-variant engine configuration
//! - [`matcher`]: detection of runs of three or more
//! - [`moves`]: move validation and application
//! - [`specials`]: where (and whether) a move earns a special tile
//! - [`effects`]: area and line clears triggered by matched specials
//! - [`scoring`]: points and coins per cascade iteration
//! - [`session`]: the move state machine and cascade loop
//! - [`rng`]: injectable random sources
//!
//! # Game Rules
//!
//! - **Moves**: swap two cells, or rotate a whole row/column by one with wraparound
//! - **Failed moves**: a swap that matches nothing is undone; a shift is kept
//!   (configurable)
//! - **Cascade**: matched cells are removed, columns fall, the top is refilled,
//!   and detection repeats until the board is stable
//! - **Scoring**: `removed × 10 × chain_index` points and one coin per three
//!   tiles, per iteration
//! - **Specials**: a straight run of 4+ touching the move leaves a booster behind;
//!   matched boosters clear their 3x3 area or their row
//!
//! # Example
//!
//! ```
//! use tile_cascade_core::{EngineConfig, Session};
//! use tile_cascade_types::{Move, Pos};
//!
//! let mut session = Session::seeded(EngineConfig::default(), 12345).unwrap();
//! assert!(session.board().is_full());
//!
//! let outcome = session
//!     .resolve_move(Move::swap(Pos::new(0, 0), Pos::new(0, 1)))
//!     .unwrap();
//!
//! // Either the swap matched and scored, or it was undone.
//! assert_eq!(outcome.accepted(), session.moves() == 1);
//! assert!(session.board().is_full());
//! ```

pub mod board;
pub mod catalog;
pub mod config;
pub mod effects;
pub mod error;
pub mod matcher;
pub mod moves;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod specials;

pub use tile_cascade_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use catalog::TileCatalog;
pub use config::{EngineConfig, ShiftPolicy, SpecialRules, Variant};
pub use effects::{expand_removals, Detonation};
pub use error::{EngineError, EngineResult, MoveRejection};
pub use matcher::{find_all_matches, has_match, MatchRun};
pub use rng::{SequenceRng, SimpleRng, TileRng};
pub use scoring::{calculate_currency, calculate_score, ScoreResult};
pub use session::{CascadeEvent, EnginePhase, MoveFault, MoveOutcome, MoveStatus, Session};
pub use snapshot::SessionSnapshot;
pub use specials::{plan_special, CreatedSpecial};
