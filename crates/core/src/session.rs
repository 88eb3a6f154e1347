//! Session module - the move state machine and cascade loop
//!
//! A [`Session`] owns the board, the random source and the counters of one
//! game. Moves go through a small state machine:
//!
//! ```text
//! Idle ── begin_move ──► Committing ──► Reverting ──► Idle        (no match, reverted)
//!                                 ├──► Idle                      (no match, shift kept)
//!                                 └──► CascadeActive ── step ──► Idle
//! ```
//!
//! Each [`Session::step`] runs one cascade iteration and returns its
//! [`CascadeEvent`], so a front end can pause between iterations.
//! [`Session::resolve_move`] drives the same steps to completion.

use std::collections::BTreeSet;

use arrayvec::ArrayVec;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::board::Board;
use crate::config::{EngineConfig, ShiftPolicy};
use crate::effects::{expand_removals, Detonation};
use crate::error::{EngineError, EngineResult, MoveRejection};
use crate::matcher::{find_all_matches, has_match, matched_cells, MatchRun};
use crate::moves::{apply_move, revert_move, validate_move};
use crate::rng::{SimpleRng, TileRng};
use crate::scoring::{score_iteration, ScoreResult};
use crate::snapshot::SessionSnapshot;
use crate::specials::{plan_special, CreatedSpecial};
use crate::types::{Move, Pos};

/// Where the move state machine currently sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnginePhase {
    #[default]
    Idle,
    /// Move applied, detection pending
    Committing,
    /// Undoing a move that produced no match
    Reverting,
    /// Matches exist; call [`Session::step`] until it returns `None`
    CascadeActive,
}

/// Result of [`Session::begin_move`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum MoveStatus {
    /// Refused before touching the board
    Rejected(MoveRejection),
    /// Applied, matched nothing, undone
    Reverted,
    /// Shift kept without a match; counts as a move
    Inert,
    /// Matches found, cascade pending
    Cascading,
}

impl MoveStatus {
    /// Whether the move was committed to the board
    pub fn accepted(&self) -> bool {
        matches!(self, MoveStatus::Inert | MoveStatus::Cascading)
    }
}

/// One cascade iteration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeEvent {
    /// 1-based position within the move's cascade
    pub chain_index: u32,
    /// Matches detected at the start of the iteration
    pub runs: Vec<MatchRun>,
    /// Every cell cleared, including detonation fallout
    pub removed: BTreeSet<Pos>,
    pub created_specials: Vec<CreatedSpecial>,
    pub detonations: Vec<Detonation>,
    pub score_delta: u32,
    pub currency_delta: u32,
}

/// Everything a fully resolved move produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub status: MoveStatus,
    pub events: Vec<CascadeEvent>,
    pub total_score_delta: u32,
    pub total_currency_delta: u32,
}

impl MoveOutcome {
    fn new(status: MoveStatus) -> Self {
        Self {
            status,
            events: Vec::new(),
            total_score_delta: 0,
            total_currency_delta: 0,
        }
    }

    fn push(&mut self, event: CascadeEvent) {
        self.total_score_delta = self.total_score_delta.saturating_add(event.score_delta);
        self.total_currency_delta = self
            .total_currency_delta
            .saturating_add(event.currency_delta);
        self.events.push(event);
    }

    pub fn accepted(&self) -> bool {
        self.status.accepted()
    }
}

/// A move whose cascade faulted part way through
///
/// `partial` holds every iteration that completed before the fault. Its totals
/// are already included in the session's score and currency.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("move faulted after {} cascade iterations", .partial.events.len())]
pub struct MoveFault {
    #[source]
    pub error: EngineError,
    pub partial: MoveOutcome,
}

/// One game: board, random source, counters
#[derive(Debug, Clone)]
pub struct Session<R: TileRng = SimpleRng> {
    config: EngineConfig,
    board: Board,
    rng: R,
    phase: EnginePhase,
    /// Move waiting for the creation policy (first iteration only)
    pending_move: Option<Move>,
    /// Iterations run by the current cascade
    chain: u32,
    score: u32,
    currency: u32,
    moves: u32,
    combo: u32,
    /// Monotonic game id (increments on reset)
    game_id: u32,
}

impl Session<SimpleRng> {
    /// Create a session driven by the built-in LCG
    pub fn seeded(config: EngineConfig, seed: u32) -> EngineResult<Self> {
        Self::new(config, SimpleRng::new(seed))
    }
}

impl<R: TileRng> Session<R> {
    /// Validate the config and generate a fresh board
    pub fn new(config: EngineConfig, mut rng: R) -> EngineResult<Self> {
        config.validate()?;
        let board = Board::generate(config.rows, config.cols, &config.catalog, &mut rng);
        Ok(Self::assemble(config, board, rng))
    }

    /// Start from explicit board contents
    ///
    /// The board must match the configured size and hold only kinds the
    /// catalog registers. Empty cells are refilled so the session starts
    /// settled.
    pub fn with_board(config: EngineConfig, mut board: Board, mut rng: R) -> EngineResult<Self> {
        config.validate()?;
        if board.rows() != config.rows || board.cols() != config.cols {
            return Err(EngineError::InvalidDimensions {
                rows: board.rows(),
                cols: board.cols(),
            });
        }
        if let Some(kind) = board
            .cells()
            .iter()
            .flatten()
            .copied()
            .find(|&kind| !config.catalog.contains(kind))
        {
            return Err(EngineError::UnknownTileKind {
                kind,
                role: "injected board cell",
            });
        }
        let filled = board.refill(&config.catalog, &mut rng);
        if filled > 0 {
            trace!(filled, "injected board had holes");
        }
        Ok(Self::assemble(config, board, rng))
    }

    fn assemble(config: EngineConfig, board: Board, rng: R) -> Self {
        Self {
            config,
            board,
            rng,
            phase: EnginePhase::Idle,
            pending_move: None,
            chain: 0,
            score: 0,
            currency: 0,
            moves: 0,
            combo: 0,
            game_id: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == EnginePhase::Idle
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn currency(&self) -> u32 {
        self.currency
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Chain index of the latest cascade iteration, 0 right after a move
    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    /// Start a new game on the same random stream
    pub fn reset(&mut self) {
        self.board = Board::generate(
            self.config.rows,
            self.config.cols,
            &self.config.catalog,
            &mut self.rng,
        );
        self.phase = EnginePhase::Idle;
        self.pending_move = None;
        self.chain = 0;
        self.score = 0;
        self.currency = 0;
        self.moves = 0;
        self.combo = 0;
        self.game_id = self.game_id.wrapping_add(1);
        debug!(game_id = self.game_id, "session reset");
    }

    /// Validate and apply a move
    ///
    /// On [`MoveStatus::Cascading`] the caller must drive [`Session::step`]
    /// until it returns `Ok(None)`; other moves are refused with
    /// [`MoveRejection::Busy`] meanwhile.
    pub fn begin_move(&mut self, mv: Move) -> MoveStatus {
        let status = self.commit(mv);
        debug!(?mv, ?status, "move");
        status
    }

    fn commit(&mut self, mv: Move) -> MoveStatus {
        if self.phase != EnginePhase::Idle {
            return MoveStatus::Rejected(MoveRejection::Busy);
        }
        if let Err(reason) = validate_move(&self.board, &mv) {
            return MoveStatus::Rejected(reason);
        }

        self.phase = EnginePhase::Committing;
        apply_move(&mut self.board, &mv);

        if has_match(&self.board) {
            self.moves = self.moves.saturating_add(1);
            self.combo = 0;
            self.chain = 0;
            self.pending_move = Some(mv);
            self.phase = EnginePhase::CascadeActive;
            return MoveStatus::Cascading;
        }

        let revert = match mv {
            Move::Swap { .. } => true,
            Move::Shift { .. } => self.config.shift_policy == ShiftPolicy::Revert,
        };
        if revert {
            self.phase = EnginePhase::Reverting;
            revert_move(&mut self.board, &mv);
            self.phase = EnginePhase::Idle;
            MoveStatus::Reverted
        } else {
            self.moves = self.moves.saturating_add(1);
            self.combo = 0;
            self.phase = EnginePhase::Idle;
            MoveStatus::Inert
        }
    }

    /// Run one cascade iteration
    ///
    /// Returns `Ok(None)` once the board is stable (or when no cascade is
    /// active). Exceeding `max_cascade_iterations` returns
    /// [`EngineError::CascadeDidNotTerminate`]; the board is still full and the
    /// session goes back to idle.
    pub fn step(&mut self) -> EngineResult<Option<CascadeEvent>> {
        if self.phase != EnginePhase::CascadeActive {
            return Ok(None);
        }

        let runs = find_all_matches(&self.board);
        if runs.is_empty() {
            self.finish_cascade();
            return Ok(None);
        }

        let limit = self.config.max_cascade_iterations;
        if self.chain >= limit {
            warn!(limit, "cascade did not settle, abandoning move");
            self.finish_cascade();
            return Err(EngineError::CascadeDidNotTerminate { limit });
        }

        self.chain += 1;
        self.combo = self.chain;
        let chain_index = self.chain;

        let created = self
            .pending_move
            .take()
            .and_then(|mv| plan_special(&runs, &mv, &self.config.specials));
        if let Some(special) = created {
            self.board.set(special.pos, Some(special.kind));
        }
        let protected: ArrayVec<Pos, 1> = created.iter().map(|s| s.pos).collect();

        let mut removed = matched_cells(&runs);
        for pos in &protected {
            removed.remove(pos);
        }
        let detonations = expand_removals(&self.board, &mut removed, &protected);

        let ScoreResult { score, currency } = score_iteration(removed.len(), chain_index);
        self.score = self.score.saturating_add(score);
        self.currency = self.currency.saturating_add(currency);

        for &pos in &removed {
            self.board.set(pos, None);
        }
        self.board.collapse();
        self.board.refill(&self.config.catalog, &mut self.rng);

        debug!(
            chain_index,
            runs = runs.len(),
            removed = removed.len(),
            detonations = detonations.len(),
            score,
            currency,
            "cascade iteration"
        );

        if !self.config.cascades_enabled {
            self.finish_cascade();
        }

        Ok(Some(CascadeEvent {
            chain_index,
            runs,
            removed,
            created_specials: created.into_iter().collect(),
            detonations,
            score_delta: score,
            currency_delta: currency,
        }))
    }

    fn finish_cascade(&mut self) {
        self.pending_move = None;
        self.chain = 0;
        self.phase = EnginePhase::Idle;
    }

    /// Apply a move and run its cascade to completion
    ///
    /// A fault mid-cascade still hands back the completed iterations, so the
    /// caller's totals stay in step with [`Session::score`].
    pub fn resolve_move(&mut self, mv: Move) -> Result<MoveOutcome, MoveFault> {
        let status = self.begin_move(mv);
        let mut outcome = MoveOutcome::new(status);
        if status == MoveStatus::Cascading {
            loop {
                match self.step() {
                    Ok(Some(event)) => outcome.push(event),
                    Ok(None) => break,
                    Err(error) => {
                        return Err(MoveFault {
                            error,
                            partial: outcome,
                        })
                    }
                }
            }
        }
        Ok(outcome)
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.rows = self.board.rows();
        out.cols = self.board.cols();
        self.board.write_grid(&mut out.board);
        out.phase = self.phase;
        out.score = self.score;
        out.currency = self.currency;
        out.moves = self.moves;
        out.combo = self.combo;
        out.game_id = self.game_id;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
