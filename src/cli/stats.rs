use std::collections::HashMap;
use std::time::Duration;

use crate::game::RoundEvent;
use crate::game::game::Game;

#[derive(Debug, Default, Clone)]
pub struct GameStats {
    pub wins: HashMap<String, u32>,
    pub results_by_player: HashMap<String, Vec<u32>>,
    pub games: u32,
    pub unfinished: u32,
    pub total_turns: u64,
    pub total_ties: u64,
    pub total_duration: Duration,
}

impl GameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_game<S>(&mut self, game: &Game<S>, duration: Duration) {
        self.games += 1;
        self.total_duration += duration;
        self.total_turns +=
            u64::from(game.round.turn_number()) + u64::from(game.round.is_over());
        self.total_ties += game
            .round
            .events()
            .iter()
            .filter(|event| matches!(event, RoundEvent::TieBroken { .. }))
            .count() as u64;

        match game.round.winner() {
            Some(winner) => *self.wins.entry(winner.name.clone()).or_insert(0) += 1,
            None => self.unfinished += 1,
        }

        for player in game.round.players() {
            self.results_by_player
                .entry(player.name.clone())
                .or_default()
                .push(player.points);
        }
    }

    pub fn merge(&mut self, other: GameStats) {
        for (name, wins) in other.wins {
            *self.wins.entry(name).or_insert(0) += wins;
        }
        for (name, points) in other.results_by_player {
            self.results_by_player.entry(name).or_default().extend(points);
        }
        self.games += other.games;
        self.unfinished += other.unfinished;
        self.total_turns += other.total_turns;
        self.total_ties += other.total_ties;
        self.total_duration += other.total_duration;
    }

    pub fn get_avg_turns(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games as f64
    }

    pub fn get_avg_duration(&self) -> Duration {
        if self.games == 0 {
            return Duration::ZERO;
        }
        self.total_duration / self.games
    }

    pub fn get_avg_points(&self, name: &str) -> f64 {
        match self.results_by_player.get(name) {
            Some(points) if !points.is_empty() => {
                points.iter().map(|p| f64::from(*p)).sum::<f64>() / points.len() as f64
            }
            _ => 0.0,
        }
    }
}

#[derive(Debug, Default)]
pub struct StatisticsAccumulator {
    pub stats: GameStats,
}

impl StatisticsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn after<S>(&mut self, game: &Game<S>, duration: Duration) {
        self.stats.record_game(game, duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_adds_up_workers() {
        let mut left = GameStats::new();
        left.games = 2;
        left.total_turns = 10;
        left.wins.insert("A".into(), 2);
        left.results_by_player.insert("A".into(), vec![20, 22]);

        let mut right = GameStats::new();
        right.games = 1;
        right.total_turns = 5;
        right.unfinished = 1;
        right.results_by_player.insert("A".into(), vec![5]);

        left.merge(right);
        assert_eq!(left.games, 3);
        assert_eq!(left.unfinished, 1);
        assert_eq!(left.get_avg_turns(), 5.0);
        assert_eq!(left.get_avg_points("A"), 47.0 / 3.0);
        assert_eq!(left.get_avg_points("nobody"), 0.0);
    }
}
