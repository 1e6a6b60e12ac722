use rand::seq::SliceRandom;

use crate::board::TileId;
use crate::bots::Bot;
use crate::game::round::Round;
use crate::question::Question;

#[derive(Debug, Clone, Default)]
pub struct RandomBot;

impl Bot for RandomBot {
    fn choose_tile(&self, _round: &Round, options: &[TileId]) -> Option<TileId> {
        let mut rng = rand::thread_rng();
        options.choose(&mut rng).copied()
    }

    fn answer(&self, _question: &Question, candidates: &[String]) -> String {
        let mut rng = rand::thread_rng();
        candidates.choose(&mut rng).cloned().unwrap_or_default()
    }
}
