//! Match detection
//!
//! A run is a maximal sequence of consecutive occupied cells of the same kind
//! along a row or column. Runs of [`MIN_MATCH_LEN`] or more are matches.
//! Detection is pure: it reads a board snapshot and never mutates it.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::board::Board;
use crate::types::{MatchDirection, Pos, TileKind, MIN_MATCH_LEN};

/// One detected match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRun {
    pub direction: MatchDirection,
    pub kind: TileKind,
    /// Cells in scan order (left to right, or top to bottom)
    pub cells: Vec<Pos>,
}

impl MatchRun {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.cells.contains(&pos)
    }

    /// The cell at index `len / 2`
    pub fn middle(&self) -> Option<Pos> {
        self.cells.get(self.cells.len() / 2).copied()
    }
}

/// Find every match on the board
///
/// Horizontal runs come first in row-major order, then vertical runs in
/// column-major order.
pub fn find_all_matches(board: &Board) -> Vec<MatchRun> {
    let mut runs = Vec::new();
    for row in 0..board.rows() {
        scan_line(
            board,
            (0..board.cols()).map(|col| Pos::new(row, col)),
            MatchDirection::Horizontal,
            &mut runs,
        );
    }
    for col in 0..board.cols() {
        scan_line(
            board,
            (0..board.rows()).map(|row| Pos::new(row, col)),
            MatchDirection::Vertical,
            &mut runs,
        );
    }
    runs
}

/// True when the board holds at least one match
pub fn has_match(board: &Board) -> bool {
    !find_all_matches(board).is_empty()
}

/// Union of all cells covered by `runs`
pub fn matched_cells(runs: &[MatchRun]) -> BTreeSet<Pos> {
    runs.iter().flat_map(|run| run.cells.iter().copied()).collect()
}

fn scan_line(
    board: &Board,
    line: impl Iterator<Item = Pos>,
    direction: MatchDirection,
    out: &mut Vec<MatchRun>,
) {
    let mut current: Option<TileKind> = None;
    let mut cells: Vec<Pos> = Vec::new();

    for pos in line {
        let kind = board.kind_at(pos);
        if kind.is_some() && kind == current {
            cells.push(pos);
            continue;
        }
        flush_run(current, &mut cells, direction, out);
        current = kind;
        if kind.is_some() {
            cells.push(pos);
        }
    }
    flush_run(current, &mut cells, direction, out);
}

fn flush_run(
    kind: Option<TileKind>,
    cells: &mut Vec<Pos>,
    direction: MatchDirection,
    out: &mut Vec<MatchRun>,
) {
    if let Some(kind) = kind {
        if cells.len() >= MIN_MATCH_LEN {
            out.push(MatchRun {
                direction,
                kind,
                cells: std::mem::take(cells),
            });
            return;
        }
    }
    cells.clear();
}
