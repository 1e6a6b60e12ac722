use serde::{Deserialize, Serialize};

use crate::board::{Board, DEFAULT_DICE_MAX, TileId};
use crate::types::Category;

pub const DEFAULT_REQUIRED_POINTS: u32 = 20;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PlayerError {
    #[error("player {0} has no position on the board")]
    NoPosition(String),
    #[error("dice roll must be positive")]
    InvalidDiceRoll,
    #[error("tile {0} is not part of the board")]
    UnknownTile(TileId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub position: Option<TileId>,
    pub points_by_category: [u32; Category::ALL.len()],
    pub points: u32,
    /// Score carried across rounds. `None` until a round has been completed.
    pub total_points: Option<u32>,
    pub dice_max: u32,
    pub required_points: u32,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: None,
            points_by_category: [0; Category::ALL.len()],
            points: 0,
            total_points: None,
            dice_max: DEFAULT_DICE_MAX,
            required_points: DEFAULT_REQUIRED_POINTS,
        }
    }

    pub fn with_total_points(mut self, total: u32) -> Self {
        self.total_points = Some(total);
        self
    }

    pub fn roll(&self, rng: &mut impl rand::Rng) -> u32 {
        rng.gen_range(1..=self.dice_max.max(1))
    }

    /// Tiles at the end of every simple path of exactly `dice_roll` steps
    /// starting at the player's position. A path never revisits a tile it
    /// already went through. The result is de-duplicated, in discovery order.
    pub fn scan(&self, board: &Board, dice_roll: u32) -> Result<Vec<TileId>, PlayerError> {
        let start = self
            .position
            .ok_or_else(|| PlayerError::NoPosition(self.name.clone()))?;
        if dice_roll == 0 {
            return Err(PlayerError::InvalidDiceRoll);
        }
        if !board.contains(start) {
            return Err(PlayerError::UnknownTile(start));
        }

        let mut on_path = vec![false; board.tile_count()];
        let mut reachable = Vec::new();
        on_path[start as usize] = true;
        walk(board, start, dice_roll, &mut on_path, &mut reachable);
        Ok(reachable)
    }

    /// Moves without checking reachability and returns the landed category.
    pub fn move_to_tile(&mut self, board: &Board, tile: TileId) -> Result<Category, PlayerError> {
        let category = board
            .category(tile)
            .ok_or(PlayerError::UnknownTile(tile))?;
        self.position = Some(tile);
        Ok(category)
    }

    /// Applies a signed delta, never going below zero.
    pub fn apply_delta(&mut self, delta: i64) {
        let updated = i64::from(self.points).saturating_add(delta);
        self.points = u32::try_from(updated.max(0)).unwrap_or(u32::MAX);
    }

    pub fn credit_category(&mut self, category: Category, amount: u32) {
        let slot = &mut self.points_by_category[category.index()];
        *slot = slot.saturating_add(amount);
    }

    pub fn won(&self) -> bool {
        self.won_by_points() || self.won_by_category()
    }

    pub fn won_by_points(&self) -> bool {
        self.points >= self.required_points
    }

    /// True once the player has scored in every question category.
    pub fn won_by_category(&self) -> bool {
        Category::QUESTION
            .iter()
            .all(|category| self.points_by_category[category.index()] > 0)
    }

    /// Folds the round score into the cross-round total.
    pub fn finish_round(&mut self) {
        self.total_points = Some(self.total_points.unwrap_or(0).saturating_add(self.points));
    }
}

fn walk(board: &Board, from: TileId, budget: u32, on_path: &mut [bool], reachable: &mut Vec<TileId>) {
    for &next in board.neighbors(from) {
        if on_path[next as usize] {
            continue;
        }
        if budget > 1 {
            on_path[next as usize] = true;
            walk(board, next, budget - 1, on_path, reachable);
            on_path[next as usize] = false;
        } else if !reachable.contains(&next) {
            reachable.push(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn line_board(len: usize) -> Board {
        let mut board = Board::new();
        let mut prev = board.first_tile();
        for _ in 0..len {
            prev = board.add_tile(Category::Nombres, &[prev]).unwrap();
        }
        board
    }

    fn placed(board: &Board, tile: TileId) -> Player {
        let mut player = Player::new("A");
        player.move_to_tile(board, tile).unwrap();
        player
    }

    #[test]
    fn scan_depth_one_returns_neighbors() {
        let mut board = Board::new();
        let centre = board.first_tile();
        let t1 = board.add_tile(Category::Transformation, &[centre]).unwrap();
        let t2 = board.add_tile(Category::Nombres, &[centre]).unwrap();
        let player = placed(&board, centre);

        let found: HashSet<_> = player.scan(&board, 1).unwrap().into_iter().collect();
        assert_eq!(found, HashSet::from([t1, t2]));
    }

    #[test]
    fn scan_on_isolated_tile_is_empty() {
        let board = Board::new();
        let player = placed(&board, board.first_tile());
        for roll in 1..=6 {
            assert!(player.scan(&board, roll).unwrap().is_empty());
        }
    }

    #[test]
    fn scan_reaches_exact_distance_on_a_line() {
        let board = line_board(5);
        let player = placed(&board, 0);
        assert_eq!(player.scan(&board, 3).unwrap(), vec![3]);
        // Past the end of the line there is no simple path long enough.
        assert!(player.scan(&board, 6).unwrap().is_empty());
    }

    #[test]
    fn scan_does_not_step_back_on_its_path() {
        // Triangle 0-1-2: two steps from 0 lands on the other corner, never on 0.
        let mut board = Board::new();
        let t1 = board.add_tile(Category::Calcul, &[0]).unwrap();
        let t2 = board.add_tile(Category::Calcul, &[0, t1]).unwrap();
        let player = placed(&board, 0);
        let found: HashSet<_> = player.scan(&board, 2).unwrap().into_iter().collect();
        assert_eq!(found, HashSet::from([t1, t2]));
        assert!(player.scan(&board, 3).unwrap().is_empty());
    }

    #[test]
    fn scan_deduplicates_tiles_reached_by_several_paths() {
        // Square 0-1-3-2-0: tile 3 is two steps away along both sides.
        let mut board = Board::new();
        let t1 = board.add_tile(Category::Calcul, &[0]).unwrap();
        let t2 = board.add_tile(Category::Calcul, &[0]).unwrap();
        let t3 = board.add_tile(Category::Calcul, &[t1, t2]).unwrap();
        let player = placed(&board, 0);
        assert_eq!(player.scan(&board, 2).unwrap(), vec![t3]);
    }

    #[test]
    fn scan_requires_position_and_positive_roll() {
        let board = line_board(2);
        let player = Player::new("nowhere");
        assert_eq!(
            player.scan(&board, 1),
            Err(PlayerError::NoPosition("nowhere".into()))
        );
        let player = placed(&board, 0);
        assert_eq!(player.scan(&board, 0), Err(PlayerError::InvalidDiceRoll));
    }

    #[test]
    fn move_returns_landed_category() {
        let board = line_board(1);
        let mut player = Player::new("A");
        assert_eq!(player.move_to_tile(&board, 1), Ok(Category::Nombres));
        assert_eq!(player.position, Some(1));
        assert_eq!(
            player.move_to_tile(&board, 40),
            Err(PlayerError::UnknownTile(40))
        );
    }

    #[test]
    fn roll_stays_in_dice_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut player = Player::new("A");
        player.dice_max = 4;
        for _ in 0..200 {
            let roll = player.roll(&mut rng);
            assert!((1..=4).contains(&roll));
        }
    }

    #[test]
    fn points_never_go_negative() {
        let mut player = Player::new("A");
        player.apply_delta(3);
        player.apply_delta(-5);
        assert_eq!(player.points, 0);
    }

    #[test]
    fn wins_by_points_threshold() {
        let mut player = Player::new("A");
        player.required_points = 3;
        player.apply_delta(2);
        assert!(!player.won());
        player.apply_delta(1);
        assert!(player.won_by_points());
    }

    #[test]
    fn wins_once_every_question_category_is_covered() {
        let mut player = Player::new("A");
        for category in &Category::QUESTION[..Category::QUESTION.len() - 1] {
            player.credit_category(*category, 1);
        }
        assert!(!player.won_by_category());
        player.credit_category(Category::Probabilites, 1);
        assert!(player.won_by_category());
        assert!(player.won());
    }

    #[test]
    fn finish_round_accumulates_total() {
        let mut player = Player::new("A");
        assert_eq!(player.total_points, None);
        player.points = 7;
        player.finish_round();
        assert_eq!(player.total_points, Some(7));
    }
}
