use uuid::Uuid;

use crate::board::BoardLayout;
use crate::bots::Bot;
use crate::game::{Player, PlayerError, RoundConfig};
use crate::game::round::{Round, RoundError, TurnPhase};
use crate::question::{QuestionError, QuestionManager, QuestionSource};
use crate::types::{AnswerKind, Category};

const TURNS_LIMIT: u32 = 1000;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Round(#[from] RoundError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error("no bot seated for player {0}")]
    MissingBot(usize),
}

/// Plays a [`Round`] end to end, asking questions from a [`QuestionSource`].
/// Bots are seated by roster index.
pub struct Game<S> {
    pub id: Uuid,
    pub seed: u64,
    pub round: Round,
    pub questions: QuestionManager<S>,
}

impl<S: QuestionSource> Game<S> {
    pub fn new(
        config: RoundConfig,
        layout: Option<&BoardLayout>,
        players: Vec<Player>,
        source: S,
    ) -> Result<Self, GameError> {
        let seed = config.seed;
        let mut round = Round::new(config, layout);
        for player in players {
            round.add_player(player)?;
        }
        Ok(Self {
            id: Uuid::new_v4(),
            seed,
            round,
            questions: QuestionManager::new(source, seed),
        })
    }

    /// Plays turns until someone wins or the turn limit is hit. Returns the
    /// winner's roster index.
    pub fn play<B: Bot>(&mut self, bots: &[B]) -> Result<Option<usize>, GameError> {
        while !self.round.is_over() && self.round.turn_number() < TURNS_LIMIT {
            self.play_tick(bots)?;
        }
        Ok(self.round.winner_index())
    }

    /// Plays one full turn for the current player. Returns `true` once the
    /// round is over.
    pub fn play_tick<B: Bot>(&mut self, bots: &[B]) -> Result<bool, GameError> {
        if self.round.is_over() {
            return Ok(true);
        }
        if self.round.turn() == TurnPhase::Idle {
            self.round.start_turn()?;
        }
        let ctx = self.round.context()?;
        let bot = bots.get(ctx.current).ok_or(GameError::MissingBot(ctx.current))?;

        let roll = self.round.roll_dice()?;
        let options = self.round.scan(roll)?;
        let current = self.round.current_player()?;
        let tile = bot
            .choose_tile(&self.round, &options)
            .or_else(|| options.first().copied())
            .or(current.position)
            .ok_or_else(|| RoundError::from(PlayerError::NoPosition(current.name.clone())))?;
        let landed = self.round.move_tile(tile)?.category;
        self.round.action()?;

        let fetched = if landed == Category::Centre {
            self.questions.fetch_random_question()?
        } else {
            self.questions.fetch_random_question_by_category(landed)?
        };
        let question = fetched.clone();
        let category = question.category.unwrap_or(landed);
        let reply = bot.answer(&question, self.questions.possible_answers());
        let correct = match question.type_reponse {
            AnswerKind::Qcm | AnswerKind::Vf => self.questions.check_selection_answer(&reply)?,
            AnswerKind::Rds | AnswerKind::Rcv => self.questions.check_text_answer(&reply)?,
        };
        tracing::debug!(game = %self.id, player = ctx.current, %category, correct, "question answered");

        self.round.avoir_question(category)?;
        Ok(self.round.post_answer(correct)?)
    }
}

impl<S> Game<S> {
    pub fn winner(&self) -> Option<&Player> {
        self.round.winner()
    }
}
