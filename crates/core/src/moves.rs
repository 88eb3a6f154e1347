//! Move validation and application
//!
//! Validation happens before any mutation so a rejected move never touches
//! the board. Application assumes a validated move.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::error::MoveRejection;
use crate::types::{Axis, Move, Pos};

/// Check a move against the board bounds
pub fn validate_move(board: &Board, mv: &Move) -> Result<(), MoveRejection> {
    match *mv {
        Move::Swap { a, b } => {
            for pos in [a, b] {
                if !board.contains(pos) {
                    return Err(MoveRejection::OutOfBounds { pos });
                }
            }
            Ok(())
        }
        Move::Shift {
            axis,
            index,
            delta,
            anchor,
        } => {
            let lines = match axis {
                Axis::Row => board.rows(),
                Axis::Col => board.cols(),
            };
            if index >= lines {
                return Err(MoveRejection::LineOutOfRange { axis, index });
            }
            if delta != 1 && delta != -1 {
                return Err(MoveRejection::InvalidDelta { delta });
            }
            if !board.contains(anchor) {
                return Err(MoveRejection::OutOfBounds { pos: anchor });
            }
            if !on_line(axis, index, anchor) {
                return Err(MoveRejection::AnchorOffLine { anchor });
            }
            Ok(())
        }
    }
}

/// Apply a validated move; returns false if the board refused it
pub fn apply_move(board: &mut Board, mv: &Move) -> bool {
    match *mv {
        Move::Swap { a, b } => board.apply_swap(a, b),
        Move::Shift {
            axis, index, delta, ..
        } => board.apply_shift(axis, index, delta),
    }
}

/// Undo a move previously applied with [`apply_move`]
pub fn revert_move(board: &mut Board, mv: &Move) -> bool {
    apply_move(board, &mv.inverse())
}

/// Whether `pos` is one of the cells the move touched
///
/// Swap: either endpoint. Shift: any cell on the shifted line.
pub fn touches(mv: &Move, pos: Pos) -> bool {
    match *mv {
        Move::Swap { a, b } => pos == a || pos == b,
        Move::Shift { axis, index, .. } => on_line(axis, index, pos),
    }
}

/// Cells used to break placement ties, most preferred first
///
/// Swap: destination then source. Shift: the anchor.
pub fn preference_list(mv: &Move) -> ArrayVec<Pos, 2> {
    let mut prefs = ArrayVec::new();
    match *mv {
        Move::Swap { a, b } => {
            prefs.push(b);
            prefs.push(a);
        }
        Move::Shift { anchor, .. } => prefs.push(anchor),
    }
    prefs
}

fn on_line(axis: Axis, index: usize, pos: Pos) -> bool {
    match axis {
        Axis::Row => pos.row == index,
        Axis::Col => pos.col == index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::empty(6, 5)
    }

    #[test]
    fn swap_bounds_checked() {
        let b = board();
        assert_eq!(validate_move(&b, &Move::swap(Pos::new(0, 0), Pos::new(5, 4))), Ok(()));
        assert_eq!(
            validate_move(&b, &Move::swap(Pos::new(0, 0), Pos::new(6, 0))),
            Err(MoveRejection::OutOfBounds { pos: Pos::new(6, 0) })
        );
    }

    #[test]
    fn shift_checks_line_delta_and_anchor() {
        let b = board();
        assert_eq!(
            validate_move(&b, &Move::shift(Axis::Col, 5, 1, Pos::new(0, 5))),
            Err(MoveRejection::LineOutOfRange { axis: Axis::Col, index: 5 })
        );
        assert_eq!(
            validate_move(&b, &Move::shift(Axis::Row, 2, 3, Pos::new(2, 0))),
            Err(MoveRejection::InvalidDelta { delta: 3 })
        );
        assert_eq!(
            validate_move(&b, &Move::shift(Axis::Row, 2, 1, Pos::new(3, 0))),
            Err(MoveRejection::AnchorOffLine { anchor: Pos::new(3, 0) })
        );
        assert_eq!(validate_move(&b, &Move::shift(Axis::Row, 5, -1, Pos::new(5, 4))), Ok(()));
    }

    #[test]
    fn touches_follows_move_kind() {
        let swap = Move::swap(Pos::new(1, 3), Pos::new(2, 3));
        assert!(touches(&swap, Pos::new(2, 3)));
        assert!(!touches(&swap, Pos::new(2, 2)));

        let shift = Move::shift(Axis::Col, 4, 1, Pos::new(0, 4));
        assert!(touches(&shift, Pos::new(5, 4)));
        assert!(!touches(&shift, Pos::new(5, 3)));
    }

    #[test]
    fn swap_prefers_destination() {
        let prefs = preference_list(&Move::swap(Pos::new(1, 3), Pos::new(2, 3)));
        assert_eq!(prefs.as_slice(), &[Pos::new(2, 3), Pos::new(1, 3)]);
    }
}
