use crate::board::TileId;
use crate::game::round::Round;
use crate::question::Question;

pub trait Bot {
    /// Picks the destination among the tiles offered by the scan.
    fn choose_tile(&self, round: &Round, options: &[TileId]) -> Option<TileId>;

    /// Answers `question`, given the candidates shown to the player.
    fn answer(&self, question: &Question, candidates: &[String]) -> String;
}
