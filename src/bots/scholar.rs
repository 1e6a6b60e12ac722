use rand::Rng;
use rand::seq::SliceRandom;

use crate::board::TileId;
use crate::bots::Bot;
use crate::game::round::Round;
use crate::question::Question;
use crate::types::AnswerKind;

const DEFAULT_ACCURACY: f64 = 0.7;

/// Knows the answer with probability `accuracy`, guesses otherwise.
#[derive(Debug, Clone)]
pub struct ScholarBot {
    pub accuracy: f64,
}

impl Default for ScholarBot {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ScholarBot {
    pub fn new(accuracy: Option<f64>) -> Self {
        Self {
            accuracy: accuracy.unwrap_or(DEFAULT_ACCURACY).clamp(0.0, 1.0),
        }
    }
}

impl Bot for ScholarBot {
    fn choose_tile(&self, _round: &Round, options: &[TileId]) -> Option<TileId> {
        let mut rng = rand::thread_rng();
        options.choose(&mut rng).copied()
    }

    fn answer(&self, question: &Question, candidates: &[String]) -> String {
        let mut rng = rand::thread_rng();
        if rng.gen_bool(self.accuracy) {
            return match question.type_reponse {
                AnswerKind::Vf => {
                    let stored = question.reponse.trim();
                    candidates
                        .iter()
                        .find(|option| option.eq_ignore_ascii_case(stored))
                        .cloned()
                        .unwrap_or_else(|| stored.to_owned())
                }
                _ => question.answers().into_iter().next().unwrap_or_default(),
            };
        }
        candidates.choose(&mut rng).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_scholar_always_answers_right() {
        let bot = ScholarBot::new(Some(1.0));
        let qcm = Question::new("2+2", "4|3|5", AnswerKind::Qcm);
        let candidates = vec!["5".to_owned(), "3".to_owned(), "4".to_owned()];
        for _ in 0..20 {
            assert_eq!(bot.answer(&qcm, &candidates), "4");
        }
        let vf = Question::new("91 est premier", "Faux", AnswerKind::Vf);
        assert_eq!(bot.answer(&vf, &[]), "Faux");
        let lowercase = Question::new("91 est premier", "faux", AnswerKind::Vf);
        let options = vec!["Vrai".to_owned(), "Faux".to_owned()];
        assert_eq!(bot.answer(&lowercase, &options), "Faux");
    }

    #[test]
    fn accuracy_is_clamped() {
        assert_eq!(ScholarBot::new(Some(3.0)).accuracy, 1.0);
        assert_eq!(ScholarBot::new(Some(-1.0)).accuracy, 0.0);
    }
}
