//! Special tile tests - creation policy and effect resolution

use std::collections::BTreeSet;

use tile_cascade::core::{
    expand_removals, find_all_matches, plan_special, Board, Detonation, SpecialRules,
};
use tile_cascade::types::{Axis, Move, Pos, SpecialEffect, SpecialTier, TileKind::*};

fn positions(cells: &[(usize, usize)]) -> BTreeSet<Pos> {
    cells.iter().map(|&(r, c)| Pos::new(r, c)).collect()
}

#[test]
fn test_run_of_four_from_swap() {
    let board = Board::from_kinds(&[
        vec![Roll, Sauce, Roll, Sauce, Roll],
        vec![Burger, Burger, Burger, Burger, Sauce],
    ])
    .unwrap();
    let runs = find_all_matches(&board);
    let mv = Move::swap(Pos::new(0, 1), Pos::new(1, 1));

    let special = plan_special(&runs, &mv, &SpecialRules::classic()).unwrap();
    assert_eq!(special.pos, Pos::new(1, 1));
    assert_eq!(special.kind, Cola);
    assert_eq!(special.tier, SpecialTier::Medium);

    let deluxe = plan_special(&runs, &mv, &SpecialRules::deluxe()).unwrap();
    assert_eq!(deluxe.kind, Shake);
}

#[test]
fn test_run_of_five_is_strong() {
    let board = Board::from_kinds(&[vec![Fries; 5]]).unwrap();
    let runs = find_all_matches(&board);
    let mv = Move::shift(Axis::Row, 0, 1, Pos::new(0, 4));
    let special = plan_special(&runs, &mv, &SpecialRules::deluxe()).unwrap();
    assert_eq!(special.tier, SpecialTier::Strong);
    assert_eq!(special.kind, Cola);
    assert_eq!(special.pos, Pos::new(0, 4));
}

#[test]
fn test_cascade_runs_never_create() {
    // A run that the move did not touch earns nothing.
    let board = Board::from_kinds(&[
        vec![Fries, Fries, Fries, Fries],
        vec![Roll, Sauce, Roll, Sauce],
    ])
    .unwrap();
    let runs = find_all_matches(&board);
    let mv = Move::swap(Pos::new(1, 0), Pos::new(1, 1));
    assert_eq!(plan_special(&runs, &mv, &SpecialRules::classic()), None);
}

#[test]
fn test_matched_cola_chains_into_shake() {
    let mut board = Board::from_kinds(&vec![vec![Roll; 5]; 5]).unwrap();
    board.set(Pos::new(0, 0), Some(Cola));
    board.set(Pos::new(1, 1), Some(Shake));

    let mut removal = positions(&[(0, 0)]);
    let detonations = expand_removals(&board, &mut removal, &[]);

    assert_eq!(
        detonations,
        vec![
            Detonation {
                origin: Pos::new(0, 0),
                effect: SpecialEffect::Area3x3
            },
            Detonation {
                origin: Pos::new(1, 1),
                effect: SpecialEffect::ClearLine
            },
        ]
    );
    let mut expected = positions(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
    expected.extend((0..5).map(|c| Pos::new(1, c)));
    assert_eq!(removal, expected);
}

#[test]
fn test_protected_cell_survives_blast() {
    let mut board = Board::from_kinds(&vec![vec![Roll; 3]; 3]).unwrap();
    board.set(Pos::new(1, 1), Some(Cola));
    board.set(Pos::new(1, 2), Some(Cola));

    let mut removal = positions(&[(1, 1)]);
    let detonations = expand_removals(&board, &mut removal, &[Pos::new(1, 2)]);

    assert_eq!(detonations.len(), 1);
    assert_eq!(removal.len(), 8);
    assert!(!removal.contains(&Pos::new(1, 2)));
}

#[test]
fn test_each_special_fires_once() {
    let mut board = Board::from_kinds(&vec![vec![Roll; 4]; 4]).unwrap();
    for pos in [Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 0), Pos::new(1, 1)] {
        board.set(pos, Some(Cola));
    }
    let mut removal = positions(&[(0, 0)]);
    let detonations = expand_removals(&board, &mut removal, &[]);
    assert_eq!(detonations.len(), 4);
    assert_eq!(removal.len(), 9);
}
