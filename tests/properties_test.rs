use std::collections::HashSet;

use mathsalamaison_rs::board::{Board, Tile};
use mathsalamaison_rs::game::{Player, Round, RoundConfig, RoundError, TurnPhase};
use mathsalamaison_rs::types::Category;
use proptest::prelude::*;

fn category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::QUESTION.to_vec())
}

/// Random board: every new tile links to a random subset of earlier tiles.
fn board() -> impl Strategy<Value = Board> {
    prop::collection::vec((category(), prop::collection::vec(any::<prop::sample::Index>(), 0..3)), 0..12)
        .prop_map(|specs| {
            let mut board = Board::new();
            for (category, picks) in specs {
                let existing = board.tile_count();
                let mut neighbors: Vec<u16> = picks.iter().map(|i| i.index(existing) as u16).collect();
                neighbors.sort_unstable();
                neighbors.dedup();
                board.add_tile(category, &neighbors).unwrap();
            }
            board
        })
}

proptest! {
    #[test]
    fn add_neighbor_twice_equals_once(ids in prop::collection::vec(0u16..20, 0..10)) {
        let mut once = Tile::new(Category::Calcul);
        let mut twice = Tile::new(Category::Calcul);
        for id in &ids {
            once.add_neighbor(*id);
            twice.add_neighbor(*id);
            twice.add_neighbor(*id);
        }
        prop_assert_eq!(once.neighbors(), twice.neighbors());
        let unique: HashSet<_> = once.neighbors().iter().collect();
        prop_assert_eq!(unique.len(), once.neighbors().len());
    }

    #[test]
    fn board_size_counts_add_tile_calls(n in 0usize..30) {
        let mut board = Board::new();
        for _ in 0..n {
            board.add_tile(Category::Nombres, &[]).unwrap();
        }
        prop_assert_eq!(board.size(), n);
        prop_assert_eq!(board.tile_count(), n + 1);
    }

    #[test]
    fn edges_are_symmetric(board in board()) {
        for (id, tile) in board.tiles() {
            for neighbor in tile.neighbors() {
                prop_assert!(board.neighbors(*neighbor).contains(&id));
            }
        }
    }

    #[test]
    fn scan_one_is_the_neighbor_set(board in board(), start in any::<prop::sample::Index>()) {
        let start = start.index(board.tile_count()) as u16;
        let mut player = Player::new("A");
        player.move_to_tile(&board, start).unwrap();
        let found: HashSet<_> = player.scan(&board, 1).unwrap().into_iter().collect();
        let expected: HashSet<_> = board.neighbors(start).iter().copied().collect();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn scan_never_returns_the_start(board in board(), start in any::<prop::sample::Index>(), roll in 1u32..5) {
        let start = start.index(board.tile_count()) as u16;
        let mut player = Player::new("A");
        player.move_to_tile(&board, start).unwrap();
        let found = player.scan(&board, roll).unwrap();
        prop_assert!(!found.contains(&start));
        let unique: HashSet<_> = found.iter().collect();
        prop_assert_eq!(unique.len(), found.len());
    }

    #[test]
    fn wrong_step_is_always_out_of_order(step in 0usize..5, correct in any::<bool>()) {
        let mut round = Round::new(RoundConfig::default(), None);
        round.add_player(Player::new("A")).unwrap();
        round.start_turn().unwrap();
        // From Started, only scan is accepted.
        let result = match step {
            0 => round.move_tile(0).map(|_| ()),
            1 => round.action().map(|_| ()),
            2 => round.avoir_question(Category::Calcul),
            3 => round.post_answer(correct).map(|_| ()),
            _ => round.start_turn().map(|_| ()),
        };
        prop_assert!(
            matches!(result, Err(RoundError::OutOfOrder { actual: TurnPhase::Started, .. })),
            "unexpected result"
        );
        prop_assert_eq!(round.turn(), TurnPhase::Started);
    }
}
