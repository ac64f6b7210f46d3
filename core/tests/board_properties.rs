// Property tests for the board engine.
//
// Invariants covered:
// - First reveal never lands on or next to a mine.
// - Placement produces exactly the requested mine count.
// - Adjacency counts match the layout.
// - Flood fill opens exactly the connected blank region and its border.
// - Win happens exactly when the last safe cell opens, flags aside.
// - Chording opens every unflagged neighbour, even after hitting a mine, and
//   is a no-op when the flag count does not match.
// - Finished boards never change.

use std::collections::{BTreeSet, VecDeque};

use minefield_core::*;
use proptest::prelude::*;

fn config_strategy() -> impl Strategy<Value = BoardConfig> {
    (1u8..=16, 1u8..=30)
        .prop_flat_map(|(rows, cols)| {
            let total = u16::from(rows) * u16::from(cols);
            (Just(rows), Just(cols), 0..total)
        })
        .prop_map(|(rows, cols, mines)| BoardConfig::new_unchecked(rows, cols, mines))
}

fn config_and_start() -> impl Strategy<Value = (BoardConfig, Coord2)> {
    config_strategy().prop_flat_map(|config| {
        (Just(config), (0..config.rows, 0..config.cols))
    })
}

fn layout_strategy() -> impl Strategy<Value = MineLayout> {
    (1u8..=12, 1u8..=12)
        .prop_flat_map(|(rows, cols)| {
            let total = usize::from(rows) * usize::from(cols);
            (Just((rows, cols)), proptest::collection::vec(prop::bool::weighted(0.15), total))
        })
        .prop_filter("needs at least one safe cell", |(_, mask)| {
            mask.iter().any(|&is_mine| !is_mine)
        })
        .prop_map(|((rows, cols), mask)| {
            let mines: Vec<Coord2> = mask
                .iter()
                .enumerate()
                .filter(|&(_, &is_mine)| is_mine)
                .map(|(i, _)| ((i / usize::from(cols)) as Coord, (i % usize::from(cols)) as Coord))
                .collect();
            MineLayout::from_mine_coords((rows, cols), &mines).unwrap()
        })
}

fn mines_on(board: &Board) -> Vec<Coord2> {
    board
        .iter_cells()
        .filter(|(_, cell)| cell.is_mine())
        .map(|(coords, _)| coords)
        .collect()
}

fn revealed_on(board: &Board) -> BTreeSet<Coord2> {
    board
        .iter_cells()
        .filter(|(_, cell)| cell.is_revealed())
        .map(|(coords, _)| coords)
        .collect()
}

/// Blank region containing `start` plus its numbered border, computed straight
/// from the layout.
fn expected_region(layout: &MineLayout, start: Coord2) -> BTreeSet<Coord2> {
    let size = layout.size();
    let mut region = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(coords) = queue.pop_front() {
        if layout.adjacent_mine_count(coords) != 0 {
            continue;
        }
        for neighbor in neighbors(coords, size) {
            if region.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }
    region
}

proptest! {
    #[test]
    fn first_reveal_is_safe_and_places_exact_count(
        (config, start) in config_and_start(),
        seed in any::<u64>(),
    ) {
        let mut board = Board::with_seed(config, seed).unwrap();
        let protected = protected_zone(start, config.size()).count() as CellCount;

        match board.reveal(start) {
            Ok(outcome) => {
                prop_assert!(outcome.has_update());
                prop_assert_ne!(outcome.state, GameState::Lost);
                prop_assert_eq!(mines_on(&board).len(), usize::from(config.mines));
                for coords in protected_zone(start, config.size()) {
                    prop_assert!(!board.cell(coords).unwrap().is_mine());
                }
            }
            Err(err) => {
                prop_assert_eq!(
                    err,
                    GameError::InsufficientSpace {
                        mines: config.mines,
                        available: config.total_cells() - protected,
                    }
                );
                prop_assert!(config.total_cells() - protected < config.mines);
                prop_assert!(!board.mines_placed());
                prop_assert!(revealed_on(&board).is_empty());
            }
        }
    }

    #[test]
    fn adjacency_matches_layout(
        (config, start) in config_and_start(),
        seed in any::<u64>(),
    ) {
        let mut board = Board::with_seed(config, seed).unwrap();
        prop_assume!(board.place_mines(start).is_ok());

        for (coords, cell) in board.iter_cells() {
            let expected = neighbors(coords, config.size())
                .filter(|&pos| board.cell(pos).unwrap().is_mine())
                .count();
            prop_assert_eq!(usize::from(cell.adjacent_mine_count()), expected);
        }
    }

    #[test]
    fn flood_fill_opens_region_and_border_only(layout in layout_strategy(), pick in any::<prop::sample::Index>()) {
        let blanks: Vec<Coord2> = {
            let (rows, cols) = layout.size();
            (0..rows)
                .flat_map(|row| (0..cols).map(move |col| (row, col)))
                .filter(|&coords| !layout.contains_mine(coords) && layout.adjacent_mine_count(coords) == 0)
                .collect()
        };
        prop_assume!(!blanks.is_empty());
        let start = blanks[pick.index(blanks.len())];

        let expected = expected_region(&layout, start);
        let mut board = Board::with_layout(layout).unwrap();
        let outcome = board.reveal(start).unwrap();

        prop_assert_eq!(usize::from(outcome.revealed), expected.len());
        prop_assert_eq!(revealed_on(&board), expected);
    }

    #[test]
    fn chord_opens_all_unflagged_neighbors(
        layout in layout_strategy(),
        pick in any::<prop::sample::Index>(),
        flags in proptest::collection::vec(any::<bool>(), 8),
    ) {
        let numbered: Vec<Coord2> = {
            let (rows, cols) = layout.size();
            (0..rows)
                .flat_map(|row| (0..cols).map(move |col| (row, col)))
                .filter(|&coords| !layout.contains_mine(coords) && layout.adjacent_mine_count(coords) > 0)
                .collect()
        };
        prop_assume!(!numbered.is_empty());
        let center = numbered[pick.index(numbered.len())];
        let count = layout.adjacent_mine_count(center);
        let around: Vec<Coord2> = neighbors(center, layout.size()).collect();

        let mut board = Board::with_layout(layout).unwrap();
        board.reveal(center).unwrap();
        prop_assume!(board.state() == GameState::Playing);

        for (&coords, &flag) in around.iter().zip(&flags) {
            if flag {
                board.toggle_flag(coords).unwrap();
            }
        }
        let flagged = around
            .iter()
            .filter(|&&coords| board.cell(coords).unwrap().is_flagged())
            .count();
        let hits_mine = around.iter().any(|&coords| {
            let cell = board.cell(coords).unwrap();
            cell.is_mine() && !cell.is_flagged()
        });

        let snapshot = board.clone();
        let outcome = board.chord(center).unwrap();

        if flagged == usize::from(count) {
            for &coords in &around {
                let cell = board.cell(coords).unwrap();
                prop_assert!(cell.is_flagged() || cell.is_revealed(), "{:?} left covered", coords);
            }
            prop_assert_eq!(outcome.state == GameState::Lost, hits_mine);
            if hits_mine {
                let triggered = board.triggered_mine().unwrap();
                prop_assert!(around.contains(&triggered));
            }
        } else {
            prop_assert!(!outcome.has_update());
            prop_assert_eq!(board, snapshot);
        }
    }

    #[test]
    fn win_only_after_last_safe_cell(layout in layout_strategy(), flag_mines in any::<bool>()) {
        let mines: Vec<Coord2> = layout.iter_mines().collect();
        let mut board = Board::with_layout(layout).unwrap();
        if flag_mines {
            for &coords in &mines {
                board.toggle_flag(coords).unwrap();
            }
        }

        let safe: Vec<Coord2> = board
            .iter_cells()
            .filter(|(_, cell)| !cell.is_mine())
            .map(|(coords, _)| coords)
            .collect();

        for coords in safe {
            let outcome = board.reveal(coords).unwrap();
            let done = board.revealed_count() == board.config().safe_cells();
            prop_assert_eq!(outcome.state == GameState::Won, done);
            prop_assert_ne!(outcome.state, GameState::Lost);
        }
        prop_assert_eq!(board.state(), GameState::Won);
    }

    #[test]
    fn finished_board_is_immutable(layout in layout_strategy(), moves in proptest::collection::vec((any::<u8>(), any::<u8>(), 0u8..3), 1..40)) {
        prop_assume!(layout.mine_count() > 0);
        let first_mine = layout.iter_mines().next().unwrap();
        let mut board = Board::with_layout(layout).unwrap();

        let outcome = board.reveal(first_mine).unwrap();
        prop_assert_eq!(outcome.state, GameState::Lost);
        for coords in mines_on(&board) {
            prop_assert!(board.cell(coords).unwrap().is_revealed());
        }

        let (rows, cols) = board.size();
        let snapshot = board.clone();
        for (row, col, kind) in moves {
            let coords = (row % rows, col % cols);
            match kind {
                0 => { board.reveal(coords).unwrap(); }
                1 => { board.toggle_flag(coords).unwrap(); }
                _ => { board.chord(coords).unwrap(); }
            }
        }
        prop_assert_eq!(board, snapshot);
    }
}

#[test]
fn beginner_scenario_from_center() {
    for seed in 0..100 {
        let mut board = Board::with_seed(BoardConfig::BEGINNER, seed).unwrap();
        board.reveal((4, 4)).unwrap();

        let mines = mines_on(&board);
        assert_eq!(mines.len(), 10);
        for row in 3..=5 {
            for col in 3..=5 {
                assert!(!mines.contains(&(row, col)));
            }
        }
    }
}

#[test]
fn flagged_mine_in_corner_still_wins() {
    let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0)]).unwrap();
    let mut board = Board::with_layout(layout).unwrap();
    board.toggle_flag((0, 0)).unwrap();

    let outcome = board.reveal((2, 2)).unwrap();

    assert_eq!(outcome.state, GameState::Won);
    assert_eq!(outcome.revealed, 8);
    assert_eq!(board.view((0, 0)).unwrap(), CellView::Flagged);
}

#[test]
fn expert_flood_fill_on_empty_board() {
    // worst case for the worklist: one connected blank region of 480 cells
    let mut board = create_board(16, 30, 0).unwrap();
    let outcome = board.reveal((8, 15)).unwrap();
    assert_eq!(outcome.revealed, 480);
    assert_eq!(outcome.state, GameState::Won);
}
