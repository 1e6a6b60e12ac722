use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::{SeedableRng, rngs::StdRng};

use super::{Question, QuestionError, QuestionSource};
use crate::types::{AnswerKind, Category};

pub const TRUE_ANSWER: &str = "Vrai";
pub const FALSE_ANSWER: &str = "Faux";

/// Holds the question currently asked, with its correct answer and the
/// candidates shown to the player.
#[derive(Debug)]
pub struct QuestionManager<S> {
    source: S,
    rng: StdRng,
    question: Option<Question>,
    correct_answer: Option<String>,
    possible_answers: Vec<String>,
}

impl<S: QuestionSource> QuestionManager<S> {
    pub fn new(source: S, seed: u64) -> Self {
        Self {
            source,
            rng: StdRng::seed_from_u64(seed),
            question: None,
            correct_answer: None,
            possible_answers: Vec::new(),
        }
    }

    pub fn fetch_random_question(&mut self) -> Result<&Question, QuestionError> {
        let question = self.source.fetch_random_question()?;
        self.load(question)
    }

    pub fn fetch_random_question_by_category(
        &mut self,
        category: Category,
    ) -> Result<&Question, QuestionError> {
        let question = self.source.fetch_random_question_by_category(category)?;
        self.load(question)
    }

    /// Makes `question` the active one and derives its answers.
    pub fn load(&mut self, question: Question) -> Result<&Question, QuestionError> {
        let answers = question.answers();
        let (correct, possible) = match question.type_reponse {
            AnswerKind::Qcm => {
                let correct = answers.first().cloned().ok_or(QuestionError::NoAnswer)?;
                let mut shuffled = answers;
                shuffled.shuffle(&mut self.rng);
                (correct, shuffled)
            }
            AnswerKind::Vf => {
                // Stored answers vary in case, the options shown do not.
                let given = normalize(&question.reponse);
                let correct = [TRUE_ANSWER, FALSE_ANSWER]
                    .into_iter()
                    .find(|option| normalize(option) == given)
                    .ok_or(QuestionError::NoAnswer)?;
                (
                    correct.to_owned(),
                    vec![TRUE_ANSWER.to_owned(), FALSE_ANSWER.to_owned()],
                )
            }
            AnswerKind::Rds | AnswerKind::Rcv => {
                let correct = answers.first().cloned().ok_or(QuestionError::NoAnswer)?;
                (correct, answers)
            }
        };
        tracing::debug!(kind = %question.type_reponse, candidates = possible.len(), "question loaded");
        self.correct_answer = Some(correct);
        self.possible_answers = possible;
        Ok(&*self.question.insert(question))
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn correct_answer(&self) -> Option<&str> {
        self.correct_answer.as_deref()
    }

    pub fn possible_answers(&self) -> &[String] {
        &self.possible_answers
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Exact match against the correct answer of a QCM or VF question.
    pub fn check_selection_answer(&self, selection: &str) -> Result<bool, QuestionError> {
        let correct = self.correct_answer.as_deref().ok_or(QuestionError::NoQuestion)?;
        Ok(selection.trim() == correct)
    }

    /// Case-insensitive match against any accepted answer.
    pub fn check_text_answer(&self, text: &str) -> Result<bool, QuestionError> {
        if self.question.is_none() {
            return Err(QuestionError::NoQuestion);
        }
        let given = normalize(text);
        Ok(self
            .accepted_answers()
            .iter()
            .any(|answer| normalize(answer) == given))
    }

    /// Order-independent match of several answers against all accepted ones.
    pub fn check_multiple_text_answers<T: AsRef<str>>(
        &self,
        texts: &[T],
    ) -> Result<bool, QuestionError> {
        if self.question.is_none() {
            return Err(QuestionError::NoQuestion);
        }
        let given = texts.iter().map(|t| normalize(t.as_ref())).sorted().collect_vec();
        let expected = self
            .accepted_answers()
            .iter()
            .map(|a| normalize(a))
            .sorted()
            .collect_vec();
        Ok(given == expected)
    }

    fn accepted_answers(&self) -> Vec<String> {
        match &self.question {
            Some(question) if question.type_reponse == AnswerKind::Vf => {
                self.correct_answer.iter().cloned().collect()
            }
            Some(_) => self.possible_answers.clone(),
            None => Vec::new(),
        }
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
