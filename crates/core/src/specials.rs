//! Special-tile creation policy
//!
//! Decides whether the player's move earned a special tile and where it lands.
//! Only the first cascade iteration of a move consults this policy, and it
//! yields at most one special per move. The first rule that fires wins:
//!
//! | Rule | Condition | Placement | Tier |
//! |------|-----------|-----------|------|
//! | Intersection | horizontal and vertical run share a cell, both long enough, one touches the move | shared cell closest to the move's preference list | Strong |
//! | Straight run | run of `min_run`+ touching the move, longest first | swap endpoint in the run, else the cell nearest the shift anchor | by length |
//!
//! The policy is pure: it returns a [`CreatedSpecial`] and the session writes
//! the tile.

use serde::Serialize;
use tracing::trace;

use crate::config::SpecialRules;
use crate::matcher::MatchRun;
use crate::moves::{preference_list, touches};
use crate::types::{MatchDirection, Move, Pos, SpecialTier, TileKind};

/// A special tile written into the board by the creation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreatedSpecial {
    pub pos: Pos,
    pub kind: TileKind,
    pub tier: SpecialTier,
}

/// Pick the special tile earned by `mv`, if any
pub fn plan_special(runs: &[MatchRun], mv: &Move, rules: &SpecialRules) -> Option<CreatedSpecial> {
    let planned = rules
        .intersection_min_run
        .and_then(|min_len| plan_intersection(runs, mv, min_len))
        .map(|pos| (pos, SpecialTier::Strong))
        .or_else(|| plan_straight(runs, mv, rules));

    planned.map(|(pos, tier)| {
        let kind = rules.kind_for(tier);
        trace!(row = pos.row, col = pos.col, kind = kind.as_str(), ?tier, "special planned");
        CreatedSpecial { pos, kind, tier }
    })
}

fn run_touches(run: &MatchRun, mv: &Move) -> bool {
    run.cells.iter().any(|&pos| touches(mv, pos))
}

fn plan_intersection(runs: &[MatchRun], mv: &Move, min_len: usize) -> Option<Pos> {
    let prefs = preference_list(mv);
    let distance = |pos: Pos| prefs.iter().map(|&p| pos.manhattan(p)).min().unwrap_or(usize::MAX);

    let horizontal = runs
        .iter()
        .filter(|r| r.direction == MatchDirection::Horizontal && r.len() >= min_len);
    let mut best: Option<(usize, Pos)> = None;

    for h in horizontal {
        let vertical = runs
            .iter()
            .filter(|r| r.direction == MatchDirection::Vertical && r.len() >= min_len);
        for v in vertical {
            if !run_touches(h, mv) && !run_touches(v, mv) {
                continue;
            }
            let (Some(h_first), Some(v_first)) = (h.cells.first(), v.cells.first()) else {
                continue;
            };
            let shared = Pos::new(h_first.row, v_first.col);
            if !h.contains(shared) || !v.contains(shared) {
                continue;
            }
            let candidate = (distance(shared), shared);
            if best.map_or(true, |b| candidate < b) {
                best = Some(candidate);
            }
        }
    }

    best.map(|(_, pos)| pos)
}

fn plan_straight(runs: &[MatchRun], mv: &Move, rules: &SpecialRules) -> Option<(Pos, SpecialTier)> {
    let mut eligible: Vec<&MatchRun> = runs
        .iter()
        .filter(|r| r.len() >= rules.min_run && run_touches(r, mv))
        .collect();
    // Stable: equal lengths keep detection order.
    eligible.sort_by(|a, b| b.len().cmp(&a.len()));

    let run = eligible.first()?;
    let pos = match *mv {
        Move::Swap { a, b } => place_for_swap(run, a, b),
        Move::Shift { anchor, .. } => place_for_shift(run, anchor),
    }?;
    Some((pos, rules.tier_for_run(run.len())))
}

fn place_for_swap(run: &MatchRun, a: Pos, b: Pos) -> Option<Pos> {
    if run.contains(b) {
        Some(b)
    } else if run.contains(a) {
        Some(a)
    } else {
        run.middle()
    }
}

fn place_for_shift(run: &MatchRun, anchor: Pos) -> Option<Pos> {
    // On a straight line the nearest cell is unique; min_by_key keeps the first.
    run.cells.iter().copied().min_by_key(|p| p.manhattan(anchor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Axis;

    fn run(direction: MatchDirection, kind: TileKind, cells: &[(usize, usize)]) -> MatchRun {
        MatchRun {
            direction,
            kind,
            cells: cells.iter().map(|&(r, c)| Pos::new(r, c)).collect(),
        }
    }

    fn row_run(row: usize, cols: std::ops::Range<usize>) -> MatchRun {
        let cells: Vec<(usize, usize)> = cols.map(|c| (row, c)).collect();
        run(MatchDirection::Horizontal, TileKind::Burger, &cells)
    }

    fn col_run(col: usize, rows: std::ops::Range<usize>) -> MatchRun {
        let cells: Vec<(usize, usize)> = rows.map(|r| (r, col)).collect();
        run(MatchDirection::Vertical, TileKind::Burger, &cells)
    }

    #[test]
    fn three_run_creates_nothing() {
        let runs = vec![row_run(2, 0..3)];
        let mv = Move::swap(Pos::new(1, 2), Pos::new(2, 2));
        assert_eq!(plan_special(&runs, &mv, &SpecialRules::classic()), None);
    }

    #[test]
    fn swap_places_on_destination() {
        let runs = vec![row_run(2, 0..4)];
        let mv = Move::swap(Pos::new(1, 3), Pos::new(2, 3));
        let created = plan_special(&runs, &mv, &SpecialRules::classic()).unwrap();
        assert_eq!(created.pos, Pos::new(2, 3));
        assert_eq!(created.kind, TileKind::Cola);
        assert_eq!(created.tier, SpecialTier::Medium);
    }

    #[test]
    fn swap_falls_back_to_source_then_middle() {
        let runs = vec![row_run(2, 0..4)];
        let mv = Move::swap(Pos::new(2, 1), Pos::new(3, 1));
        let created = plan_special(&runs, &mv, &SpecialRules::classic()).unwrap();
        assert_eq!(created.pos, Pos::new(2, 1));

        assert_eq!(place_for_swap(&runs[0], Pos::new(5, 5), Pos::new(4, 4)), Some(Pos::new(2, 2)));
    }

    #[test]
    fn run_away_from_move_is_ignored() {
        let runs = vec![row_run(4, 0..5)];
        let mv = Move::swap(Pos::new(1, 3), Pos::new(2, 3));
        assert_eq!(plan_special(&runs, &mv, &SpecialRules::classic()), None);
    }

    #[test]
    fn longest_run_wins() {
        let runs = vec![row_run(0, 0..4), col_run(5, 0..5)];
        let mv = Move::shift(Axis::Row, 0, 1, Pos::new(0, 0));
        let created = plan_special(&runs, &mv, &SpecialRules::deluxe()).unwrap();
        // Row 0 touches the shifted line; column 5 passes through (0, 5).
        assert_eq!(created.tier, SpecialTier::Strong);
        assert_eq!(created.kind, TileKind::Cola);
        assert_eq!(created.pos, Pos::new(0, 5));
    }

    #[test]
    fn shift_picks_cell_nearest_anchor() {
        let runs = vec![row_run(3, 1..5)];
        let mv = Move::shift(Axis::Row, 3, -1, Pos::new(3, 5));
        let created = plan_special(&runs, &mv, &SpecialRules::classic()).unwrap();
        assert_eq!(created.pos, Pos::new(3, 4));
    }

    #[test]
    fn shift_on_column_run() {
        let runs = vec![col_run(2, 1..6)];
        let mv = Move::shift(Axis::Col, 2, 1, Pos::new(0, 2));
        let created = plan_special(&runs, &mv, &SpecialRules::deluxe()).unwrap();
        assert_eq!(created.pos, Pos::new(1, 2));
        assert_eq!(created.tier, SpecialTier::Strong);
    }

    #[test]
    fn shift_anchor_off_run_uses_nearest_cell() {
        let r = row_run(1, 0..4);
        assert_eq!(place_for_shift(&r, Pos::new(0, 7)), Some(Pos::new(1, 3)));
        assert_eq!(place_for_shift(&r, Pos::new(5, 2)), Some(Pos::new(1, 2)));
    }

    #[test]
    fn intersection_beats_straight_run_in_deluxe() {
        // L shape: row 2 cols 0..3 and col 0 rows 0..3 share (2, 0).
        let runs = vec![row_run(2, 0..3), col_run(0, 0..3)];
        let mv = Move::swap(Pos::new(2, 3), Pos::new(2, 2));
        let created = plan_special(&runs, &mv, &SpecialRules::deluxe()).unwrap();
        assert_eq!(created.pos, Pos::new(2, 0));
        assert_eq!(created.tier, SpecialTier::Strong);
        assert_eq!(created.kind, TileKind::Cola);

        // Classic has no intersection rule and neither run reaches four.
        assert_eq!(plan_special(&runs, &mv, &SpecialRules::classic()), None);
    }

    #[test]
    fn intersection_picks_closest_to_preferences() {
        // Two crossings: (1, 1) and (1, 4); swap destination is (0, 4).
        let runs = vec![row_run(1, 0..6), col_run(1, 0..3), col_run(4, 0..3)];
        let mv = Move::swap(Pos::new(0, 5), Pos::new(0, 4));
        let created = plan_special(&runs, &mv, &SpecialRules::deluxe()).unwrap();
        assert_eq!(created.pos, Pos::new(1, 4));
    }

    #[test]
    fn parallel_runs_do_not_intersect() {
        let runs = vec![row_run(0, 0..3), row_run(1, 0..3)];
        let mv = Move::swap(Pos::new(0, 0), Pos::new(1, 0));
        assert_eq!(plan_special(&runs, &mv, &SpecialRules::deluxe()), None);
    }
}
