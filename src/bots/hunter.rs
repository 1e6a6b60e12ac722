use crate::board::TileId;
use crate::bots::{Bot, ScholarBot};
use crate::game::round::Round;
use crate::question::Question;
use crate::types::Category;

/// Heads for categories the current player has not scored in yet, answering
/// like a [`ScholarBot`].
#[derive(Debug, Clone, Default)]
pub struct CategoryHunterBot {
    pub scholar: ScholarBot,
}

impl CategoryHunterBot {
    pub fn new(accuracy: Option<f64>) -> Self {
        Self {
            scholar: ScholarBot::new(accuracy),
        }
    }
}

impl Bot for CategoryHunterBot {
    fn choose_tile(&self, round: &Round, options: &[TileId]) -> Option<TileId> {
        let Ok(player) = round.current_player() else {
            return options.first().copied();
        };
        let board = round.board();
        options
            .iter()
            .copied()
            .find(|tile| {
                board
                    .category(*tile)
                    .is_some_and(|category| {
                        category != Category::Centre
                            && player.points_by_category[category.index()] == 0
                    })
            })
            .or_else(|| self.scholar.choose_tile(round, options))
    }

    fn answer(&self, question: &Question, candidates: &[String]) -> String {
        self.scholar.answer(question, candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardLayout, LayoutTile};
    use crate::game::{Player, RoundConfig};

    #[test]
    fn prefers_uncovered_categories() {
        let layout = BoardLayout {
            tiles: vec![
                LayoutTile::new(0, Category::Centre, vec![1, 2]),
                LayoutTile::new(1, Category::Nombres, vec![]),
                LayoutTile::new(2, Category::Calcul, vec![]),
            ],
        };
        let mut round = Round::new(RoundConfig::default(), Some(&layout));
        let mut player = Player::new("A");
        player.credit_category(Category::Nombres, 1);
        round.add_player(player).unwrap();
        round.start_turn().unwrap();

        let bot = CategoryHunterBot::default();
        assert_eq!(bot.choose_tile(&round, &[1, 2]), Some(2));
        assert_eq!(bot.choose_tile(&round, &[0, 2]), Some(2));
    }
}
