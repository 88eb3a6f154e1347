//! Special-tile effect resolver
//!
//! Special tiles caught in a removal set detonate and pull more cells into it.
//! A detonation that uncovers another special queues that one too; each
//! `(cell, effect)` pair fires at most once so chains always end.

use std::collections::{BTreeSet, HashSet, VecDeque};

use serde::Serialize;

use crate::board::Board;
use crate::types::{Pos, SpecialEffect};

/// Advisory record of one special tile going off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Detonation {
    pub origin: Pos,
    pub effect: SpecialEffect,
}

/// Grow `removal` with every cell reached by special-tile effects
///
/// Cells in `protected` (freshly created specials) are never added and never
/// detonate. Returns the detonations in processing order.
pub fn expand_removals(
    board: &Board,
    removal: &mut BTreeSet<Pos>,
    protected: &[Pos],
) -> Vec<Detonation> {
    let effect_at = |pos: Pos| {
        board
            .kind_at(pos)
            .map(|kind| kind.special_effect())
            .filter(|effect| *effect != SpecialEffect::None)
    };

    let mut queue: VecDeque<(Pos, SpecialEffect)> = removal
        .iter()
        .filter(|pos| !protected.contains(pos))
        .filter_map(|&pos| effect_at(pos).map(|effect| (pos, effect)))
        .collect();
    let mut fired: HashSet<(Pos, SpecialEffect)> = HashSet::new();
    let mut detonations = Vec::new();

    while let Some((origin, effect)) = queue.pop_front() {
        if !fired.insert((origin, effect)) {
            continue;
        }
        detonations.push(Detonation { origin, effect });

        for pos in affected_cells(board, origin, effect) {
            if protected.contains(&pos) || !removal.insert(pos) {
                continue;
            }
            if let Some(next) = effect_at(pos) {
                queue.push_back((pos, next));
            }
        }
    }

    detonations
}

/// Cells an effect reaches from `origin`, clipped to the board
pub fn affected_cells(board: &Board, origin: Pos, effect: SpecialEffect) -> Vec<Pos> {
    match effect {
        SpecialEffect::None => Vec::new(),
        SpecialEffect::Area3x3 => {
            let last_row = board.rows().saturating_sub(1);
            let last_col = board.cols().saturating_sub(1);
            let rows = origin.row.saturating_sub(1)..=(origin.row + 1).min(last_row);
            let cols = origin.col.saturating_sub(1)..=(origin.col + 1).min(last_col);
            rows.flat_map(|row| cols.clone().map(move |col| Pos::new(row, col)))
                .collect()
        }
        SpecialEffect::ClearLine => (0..board.cols())
            .map(|col| Pos::new(origin.row, col))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileKind::{self, *};

    fn board_with(specials: &[(usize, usize, TileKind)]) -> Board {
        let mut board = Board::from_kinds(&vec![vec![Burger; 5]; 5]).unwrap();
        for &(r, c, kind) in specials {
            board.set(Pos::new(r, c), Some(kind));
        }
        board
    }

    fn set(cells: &[(usize, usize)]) -> BTreeSet<Pos> {
        cells.iter().map(|&(r, c)| Pos::new(r, c)).collect()
    }

    #[test]
    fn ordinary_tiles_do_nothing() {
        let board = board_with(&[]);
        let mut removal = set(&[(0, 0), (0, 1), (0, 2)]);
        assert!(expand_removals(&board, &mut removal, &[]).is_empty());
        assert_eq!(removal.len(), 3);
    }

    #[test]
    fn area_clear_is_clipped_at_corner() {
        let board = board_with(&[(0, 0, Cola)]);
        let mut removal = set(&[(0, 0)]);
        let detonations = expand_removals(&board, &mut removal, &[]);
        assert_eq!(
            detonations,
            vec![Detonation {
                origin: Pos::new(0, 0),
                effect: SpecialEffect::Area3x3
            }]
        );
        assert_eq!(removal, set(&[(0, 0), (0, 1), (1, 0), (1, 1)]));
    }

    #[test]
    fn area_clear_in_middle_takes_nine() {
        let board = board_with(&[(2, 2, Cola)]);
        let mut removal = set(&[(2, 2)]);
        expand_removals(&board, &mut removal, &[]);
        assert_eq!(removal.len(), 9);
    }

    #[test]
    fn line_clear_takes_row() {
        let board = board_with(&[(3, 1, Shake)]);
        let mut removal = set(&[(3, 1)]);
        expand_removals(&board, &mut removal, &[]);
        assert_eq!(removal, (0..5).map(|c| Pos::new(3, c)).collect());
    }

    #[test]
    fn detonations_chain() {
        // Shake on row 0 reaches the cola at (0, 4), whose area reaches (1, 3).
        let board = board_with(&[(0, 0, Shake), (0, 4, Cola), (1, 3, Shake)]);
        let mut removal = set(&[(0, 0)]);
        let detonations = expand_removals(&board, &mut removal, &[]);
        let origins: Vec<Pos> = detonations.iter().map(|d| d.origin).collect();
        assert_eq!(origins, vec![Pos::new(0, 0), Pos::new(0, 4), Pos::new(1, 3)]);
        // Row 0 + row 1 (from the second shake) + nothing else.
        assert_eq!(removal.len(), 10);
    }

    #[test]
    fn protected_cells_survive() {
        let board = board_with(&[(2, 2, Cola), (2, 3, Cola)]);
        let mut removal = set(&[(2, 2), (2, 3)]);
        let protected = [Pos::new(2, 3)];
        removal.remove(&Pos::new(2, 3));
        let detonations = expand_removals(&board, &mut removal, &protected);
        assert_eq!(detonations.len(), 1);
        assert!(!removal.contains(&Pos::new(2, 3)));
        assert_eq!(removal.len(), 8);
    }

    #[test]
    fn each_special_fires_once() {
        let board = board_with(&[(1, 1, Cola), (1, 2, Cola)]);
        let mut removal = set(&[(1, 1), (1, 2)]);
        let detonations = expand_removals(&board, &mut removal, &[]);
        assert_eq!(detonations.len(), 2);
        // Union of two overlapping 3x3 areas: rows 0..=2, cols 0..=3.
        assert_eq!(removal.len(), 12);
    }
}
