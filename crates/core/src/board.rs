//! Board module - manages the tile grid
//!
//! The board is a `rows x cols` grid where each cell is empty or holds a tile kind.
//! Uses a flat row-major `Vec` sized once at construction; dimensions never change.
//! Coordinates: `Pos { row, col }`, row 0 is the top. Gravity pulls tiles toward
//! the highest row index and refills enter from the top.

use tracing::trace;

use crate::catalog::TileCatalog;
use crate::rng::TileRng;
use crate::types::{Axis, Cell, Pos, TileKind, GENERATION_ATTEMPTS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a board with every cell empty
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Generate a full board with no run of three
    ///
    /// Cells are filled row-major. Each cell takes up to [`GENERATION_ATTEMPTS`]
    /// random draws, rejecting a kind that would complete a run of three with the
    /// two cells to its left or the two cells above. When every draw fails the
    /// catalog kinds are tried in order, and only if all of them fail is the last
    /// random draw kept.
    pub fn generate<R: TileRng + ?Sized>(
        rows: usize,
        cols: usize,
        catalog: &TileCatalog,
        rng: &mut R,
    ) -> Self {
        let mut board = Self::empty(rows, cols);
        for row in 0..rows {
            for col in 0..cols {
                let pos = Pos::new(row, col);
                let kind = board.pick_safe_kind(pos, catalog, rng);
                board.cells[row * cols + col] = Some(kind);
            }
        }
        board
    }

    fn pick_safe_kind<R: TileRng + ?Sized>(
        &self,
        pos: Pos,
        catalog: &TileCatalog,
        rng: &mut R,
    ) -> TileKind {
        let mut last = catalog.draw(rng);
        if !self.completes_run(pos, last) {
            return last;
        }
        for _ in 1..GENERATION_ATTEMPTS {
            last = catalog.draw(rng);
            if !self.completes_run(pos, last) {
                return last;
            }
        }

        trace!(row = pos.row, col = pos.col, "random draws exhausted, scanning catalog");
        catalog
            .ordinary()
            .iter()
            .copied()
            .find(|&kind| !self.completes_run(pos, kind))
            .unwrap_or(last)
    }

    /// Whether placing `kind` at `pos` completes a run of three ending there
    fn completes_run(&self, pos: Pos, kind: TileKind) -> bool {
        let same = |row: usize, col: usize| self.cells[row * self.cols + col] == Some(kind);
        let horizontal = pos.col >= 2 && same(pos.row, pos.col - 1) && same(pos.row, pos.col - 2);
        let vertical = pos.row >= 2 && same(pos.row - 1, pos.col) && same(pos.row - 2, pos.col);
        horizontal || vertical
    }

    #[inline(always)]
    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.row >= self.rows || pos.col >= self.cols {
            return None;
        }
        Some(pos.row * self.cols + pos.col)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.index(pos).is_some()
    }

    /// Get cell at `pos`
    /// Returns None if out of bounds
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Tile kind at `pos`, None if empty or out of bounds
    pub fn kind_at(&self, pos: Pos) -> Option<TileKind> {
        self.get(pos).flatten()
    }

    /// Set cell at `pos`
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: Pos, cell: Cell) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    /// Get the flat row-major cell slice
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// True when no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Compact each column toward the bottom, keeping tile order
    ///
    /// Empties end up at the top of their column.
    pub fn collapse(&mut self) {
        for col in 0..self.cols {
            let mut write = self.rows;
            for read in (0..self.rows).rev() {
                let cell = self.cells[read * self.cols + col];
                if cell.is_some() {
                    write -= 1;
                    if write != read {
                        self.cells[write * self.cols + col] = cell;
                        self.cells[read * self.cols + col] = None;
                    }
                }
            }
        }
    }

    /// Fill every empty cell with a random ordinary kind
    ///
    /// No match check is made; new runs are picked up by the next detection pass.
    /// Returns the number of cells filled.
    pub fn refill<R: TileRng + ?Sized>(&mut self, catalog: &TileCatalog, rng: &mut R) -> usize {
        let mut filled = 0;
        for cell in self.cells.iter_mut().filter(|cell| cell.is_none()) {
            *cell = Some(catalog.draw(rng));
            filled += 1;
        }
        filled
    }

    /// Rotate one full row or column by one cell with wraparound
    ///
    /// `delta = 1` moves every tile toward the higher index, `-1` the reverse.
    /// Returns false (leaving the board untouched) for an out-of-range line or
    /// a delta other than ±1.
    pub fn apply_shift(&mut self, axis: Axis, index: usize, delta: i8) -> bool {
        if delta != 1 && delta != -1 {
            return false;
        }
        match axis {
            Axis::Row => {
                if index >= self.rows {
                    return false;
                }
                let start = index * self.cols;
                let line = &mut self.cells[start..start + self.cols];
                if delta > 0 {
                    line.rotate_right(1);
                } else {
                    line.rotate_left(1);
                }
            }
            Axis::Col => {
                if index >= self.cols {
                    return false;
                }
                let mut line: Vec<Cell> = (0..self.rows)
                    .map(|row| self.cells[row * self.cols + index])
                    .collect();
                if delta > 0 {
                    line.rotate_right(1);
                } else {
                    line.rotate_left(1);
                }
                for (row, cell) in line.into_iter().enumerate() {
                    self.cells[row * self.cols + index] = cell;
                }
            }
        }
        true
    }

    /// Exchange two cells
    /// Returns false if either position is out of bounds
    pub fn apply_swap(&mut self, a: Pos, b: Pos) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// Build a board from explicit rows
    ///
    /// Returns None when the rows are ragged or empty.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let cols = rows.first().map(Vec::len)?;
        if cols == 0 || rows.iter().any(|row| row.len() != cols) {
            return None;
        }
        let height = rows.len();
        Some(Self {
            rows: height,
            cols,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Build a board from kinds only (every cell occupied)
    pub fn from_kinds(rows: &[Vec<TileKind>]) -> Option<Self> {
        Self::from_rows(
            rows.iter()
                .map(|row| row.iter().copied().map(Some).collect())
                .collect(),
        )
    }

    /// Convert to 2D rows
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        let mut out = Vec::new();
        self.write_grid(&mut out);
        out
    }

    /// Copy the grid into `out`, reusing its allocations
    pub fn write_grid(&self, out: &mut Vec<Vec<Cell>>) {
        out.resize_with(self.rows, Vec::new);
        for (row, dst) in out.iter_mut().enumerate() {
            let start = row * self.cols;
            dst.clear();
            dst.extend_from_slice(&self.cells[start..start + self.cols]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{SequenceRng, SimpleRng};
    use TileKind::*;

    fn sample() -> Board {
        Board::from_kinds(&[
            vec![Burger, Brownie, Chicken],
            vec![Roll, Fries, Sauce],
            vec![Chicken, Burger, Brownie],
        ])
        .unwrap()
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::empty(4, 5);
        assert_eq!(board.index(Pos::new(0, 0)), Some(0));
        assert_eq!(board.index(Pos::new(0, 4)), Some(4));
        assert_eq!(board.index(Pos::new(1, 0)), Some(5));
        assert_eq!(board.index(Pos::new(3, 4)), Some(19));
        assert_eq!(board.index(Pos::new(4, 0)), None);
        assert_eq!(board.index(Pos::new(0, 5)), None);
    }

    #[test]
    fn test_get_set() {
        let mut board = Board::empty(3, 3);
        assert_eq!(board.get(Pos::new(1, 1)), Some(None));
        assert!(board.set(Pos::new(1, 1), Some(Cola)));
        assert_eq!(board.kind_at(Pos::new(1, 1)), Some(Cola));
        assert!(!board.set(Pos::new(3, 0), Some(Cola)));
        assert_eq!(board.get(Pos::new(3, 0)), None);
    }

    #[test]
    fn test_generate_fills_every_cell() {
        let mut rng = SimpleRng::new(42);
        let board = Board::generate(6, 6, &TileCatalog::classic(), &mut rng);
        assert!(board.is_full());
        assert_eq!(board.cells().len(), 36);
        assert!(board.cells().iter().flatten().all(|k| !k.is_special()));
    }

    #[test]
    fn test_generate_falls_back_to_catalog_scan() {
        // A scripted RNG that always draws Burger would build runs; the catalog
        // scan must break them.
        let mut rng = SequenceRng::new(vec![0]);
        let board = Board::generate(4, 4, &TileCatalog::classic(), &mut rng);
        assert_eq!(board.row(0).unwrap(), &[Some(Burger), Some(Burger), Some(Brownie), Some(Burger)]);
        for row in 0..4 {
            for col in 0..4 {
                let pos = Pos::new(row, col);
                let kind = board.kind_at(pos).unwrap();
                let mut probe = board.clone();
                probe.set(pos, None);
                assert!(!probe.completes_run(pos, kind), "run completed at {:?}", pos);
            }
        }
    }

    #[test]
    fn test_generate_accepts_last_draw_with_single_kind() {
        let catalog = TileCatalog::new(&[Sauce], &[Cola]).unwrap();
        let mut rng = SimpleRng::new(3);
        let board = Board::generate(3, 3, &catalog, &mut rng);
        assert!(board.cells().iter().all(|c| *c == Some(Sauce)));
    }

    #[test]
    fn test_collapse_preserves_order() {
        let mut board = Board::from_rows(vec![
            vec![Some(Burger), Some(Roll)],
            vec![None, Some(Fries)],
            vec![Some(Chicken), None],
            vec![None, None],
        ])
        .unwrap();
        board.collapse();
        assert_eq!(
            board.to_rows(),
            vec![
                vec![None, None],
                vec![None, None],
                vec![Some(Burger), Some(Roll)],
                vec![Some(Chicken), Some(Fries)],
            ]
        );
    }

    #[test]
    fn test_refill_only_touches_empties() {
        let mut board = sample();
        board.set(Pos::new(0, 1), None);
        board.set(Pos::new(2, 2), None);
        let mut rng = SequenceRng::new(vec![5]);
        let filled = board.refill(&TileCatalog::classic(), &mut rng);
        assert_eq!(filled, 2);
        assert_eq!(board.kind_at(Pos::new(0, 1)), Some(Sauce));
        assert_eq!(board.kind_at(Pos::new(2, 2)), Some(Sauce));
        assert_eq!(board.kind_at(Pos::new(0, 0)), Some(Burger));
    }

    #[test]
    fn test_shift_row_right_wraps() {
        let mut board = sample();
        assert!(board.apply_shift(Axis::Row, 0, 1));
        assert_eq!(board.row(0).unwrap(), &[Some(Chicken), Some(Burger), Some(Brownie)]);
        assert!(board.apply_shift(Axis::Row, 0, -1));
        assert_eq!(board, sample());
    }

    #[test]
    fn test_shift_col_down_wraps() {
        let mut board = sample();
        assert!(board.apply_shift(Axis::Col, 2, 1));
        assert_eq!(board.kind_at(Pos::new(0, 2)), Some(Brownie));
        assert_eq!(board.kind_at(Pos::new(1, 2)), Some(Chicken));
        assert_eq!(board.kind_at(Pos::new(2, 2)), Some(Sauce));
        assert!(board.apply_shift(Axis::Col, 2, -1));
        assert_eq!(board, sample());
    }

    #[test]
    fn test_shift_rejects_bad_input() {
        let mut board = sample();
        assert!(!board.apply_shift(Axis::Row, 3, 1));
        assert!(!board.apply_shift(Axis::Col, 0, 2));
        assert!(!board.apply_shift(Axis::Col, 0, 0));
        assert_eq!(board, sample());
    }

    #[test]
    fn test_swap_is_self_inverse() {
        let mut board = sample();
        assert!(board.apply_swap(Pos::new(0, 0), Pos::new(2, 2)));
        assert_eq!(board.kind_at(Pos::new(0, 0)), Some(Brownie));
        assert_eq!(board.kind_at(Pos::new(2, 2)), Some(Burger));
        assert!(board.apply_swap(Pos::new(0, 0), Pos::new(2, 2)));
        assert_eq!(board, sample());
        assert!(!board.apply_swap(Pos::new(0, 0), Pos::new(0, 3)));
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(Board::from_rows(vec![vec![None, None], vec![None]]).is_none());
        assert!(Board::from_rows(Vec::new()).is_none());
        assert!(Board::from_rows(vec![Vec::new()]).is_none());
    }

    #[test]
    fn test_write_grid_reuses_buffer() {
        let board = sample();
        let mut out = vec![vec![None; 7]; 5];
        board.write_grid(&mut out);
        assert_eq!(out, board.to_rows());
        assert_eq!(out.len(), 3);
    }
}
