//! Cursor and selection handler.
//!
//! Stands in for pointer drags in a terminal: the cursor marks a cell, a
//! selection turns the next direction key into a swap, and shift-directions
//! rotate the cursor's line. Adjacency of swaps is enforced here, not by the
//! engine.

use crate::types::{Axis, GameAction, Move, Pos};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputHandler {
    rows: usize,
    cols: usize,
    cursor: Pos,
    selected: Option<Pos>,
}

impl InputHandler {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cursor: Pos::new(0, 0),
            selected: None,
        }
    }

    pub fn cursor(&self) -> Pos {
        self.cursor
    }

    pub fn selected(&self) -> Option<Pos> {
        self.selected
    }

    /// Drop the selection and park the cursor in the corner
    pub fn reset(&mut self) {
        self.cursor = Pos::new(0, 0);
        self.selected = None;
    }

    /// Feed one action; returns the move it completes, if any
    pub fn apply(&mut self, action: GameAction) -> Option<Move> {
        if self.rows == 0 || self.cols == 0 {
            return None;
        }
        match action {
            GameAction::CursorUp => self.direction(-1, 0),
            GameAction::CursorDown => self.direction(1, 0),
            GameAction::CursorLeft => self.direction(0, -1),
            GameAction::CursorRight => self.direction(0, 1),
            GameAction::Select => {
                self.selected = match self.selected {
                    Some(pos) if pos == self.cursor => None,
                    _ => Some(self.cursor),
                };
                None
            }
            GameAction::Cancel => {
                self.selected = None;
                None
            }
            GameAction::ShiftLeft => Some(self.shift(Axis::Row, -1)),
            GameAction::ShiftRight => Some(self.shift(Axis::Row, 1)),
            GameAction::ShiftUp => Some(self.shift(Axis::Col, -1)),
            GameAction::ShiftDown => Some(self.shift(Axis::Col, 1)),
            GameAction::Pause | GameAction::Restart => None,
        }
    }

    fn direction(&mut self, dr: isize, dc: isize) -> Option<Move> {
        let target = self.step(dr, dc);
        match self.selected.take() {
            Some(from) => {
                let to = self.neighbour(from, dr, dc)?;
                self.cursor = to;
                Some(Move::swap(from, to))
            }
            None => {
                if let Some(pos) = target {
                    self.cursor = pos;
                }
                None
            }
        }
    }

    fn shift(&mut self, axis: Axis, delta: i8) -> Move {
        self.selected = None;
        let index = match axis {
            Axis::Row => self.cursor.row,
            Axis::Col => self.cursor.col,
        };
        Move::shift(axis, index, delta, self.cursor)
    }

    fn step(&self, dr: isize, dc: isize) -> Option<Pos> {
        self.neighbour(self.cursor, dr, dc)
    }

    fn neighbour(&self, from: Pos, dr: isize, dc: isize) -> Option<Pos> {
        let row = from.row.checked_add_signed(dr)?;
        let col = from.col.checked_add_signed(dc)?;
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(Pos::new(row, col))
    }
}
