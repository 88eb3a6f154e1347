use serde::Serialize;

use crate::session::EnginePhase;
use crate::types::Cell;

/// Read-only copy of a session for renderers and exporters
///
/// Fill it with [`crate::Session::snapshot_into`] to reuse the grid allocation
/// across frames.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SessionSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Cell grid, `board[row][col]`
    pub board: Vec<Vec<Cell>>,
    pub phase: EnginePhase,
    pub score: u32,
    pub currency: u32,
    pub moves: u32,
    pub combo: u32,
    pub game_id: u32,
}

impl SessionSnapshot {
    pub fn clear(&mut self) {
        self.rows = 0;
        self.cols = 0;
        self.board.clear();
        self.phase = EnginePhase::Idle;
        self.score = 0;
        self.currency = 0;
        self.moves = 0;
        self.combo = 0;
        self.game_id = 0;
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.board.get(row).and_then(|r| r.get(col)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileKind;

    #[test]
    fn cell_lookup_is_bounds_checked() {
        let snap = SessionSnapshot {
            rows: 1,
            cols: 2,
            board: vec![vec![Some(TileKind::Cola), None]],
            ..Default::default()
        };
        assert_eq!(snap.cell(0, 0), Some(Some(TileKind::Cola)));
        assert_eq!(snap.cell(0, 1), Some(None));
        assert_eq!(snap.cell(1, 0), None);
    }

    #[test]
    fn clear_resets_everything() {
        let mut snap = SessionSnapshot {
            rows: 1,
            cols: 1,
            board: vec![vec![None]],
            score: 40,
            moves: 2,
            ..Default::default()
        };
        snap.clear();
        assert_eq!(snap, SessionSnapshot::default());
    }
}
