use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::{SeedableRng, rngs::StdRng};

use super::{Question, QuestionError, QuestionSource};
use crate::types::{AnswerKind, Category};

/// In-memory question source.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    rng: StdRng,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>, seed: u64) -> Self {
        Self {
            questions,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_json(json: &str, seed: u64) -> Result<Self, QuestionError> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Ok(Self::new(questions, seed))
    }

    pub fn from_path(path: impl AsRef<Path>, seed: u64) -> Result<Self, QuestionError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw, seed)
    }

    /// A handful of questions, at least one per question category.
    pub fn sample(seed: u64) -> Self {
        let questions = vec![
            Question::new("Quelle est l'image de A par la symétrie de centre A ?", "A", AnswerKind::Rds)
                .with_category(Category::Transformation),
            Question::new("Une translation conserve les longueurs.", "Vrai", AnswerKind::Vf)
                .with_category(Category::Transformation),
            Question::new("Combien vaut 7 x 8 ?", "56|54|63|48", AnswerKind::Qcm)
                .with_category(Category::Nombres),
            Question::new("Le nombre 91 est-il premier ?", "Faux", AnswerKind::Vf)
                .with_category(Category::Nombres),
            Question::new("Combien de côtés a un hexagone ?", "6|six", AnswerKind::Rcv)
                .with_category(Category::Geometrie),
            Question::new("Somme des angles d'un triangle, en degrés ?", "180|90|360|270", AnswerKind::Qcm)
                .with_category(Category::Geometrie),
            Question::new("Calculer 3 + 4 x 2.", "11|14|10|9", AnswerKind::Qcm)
                .with_category(Category::Calcul),
            Question::new("Que vaut 2 puissance 5 ?", "32", AnswerKind::Rcv)
                .with_category(Category::Calcul),
            Question::new("Image de 3 par f(x) = 2x - 1 ?", "5", AnswerKind::Rcv)
                .with_category(Category::Fonctions),
            Question::new("Une fonction affine est représentée par une droite.", "Vrai", AnswerKind::Vf)
                .with_category(Category::Fonctions),
            Question::new("Probabilité d'obtenir pile avec une pièce équilibrée ?", "1/2|0,5|0.5", AnswerKind::Rcv)
                .with_category(Category::Probabilites),
            Question::new("Une probabilité peut valoir 1,5.", "Faux", AnswerKind::Vf)
                .with_category(Category::Probabilites),
        ];
        Self::new(questions, seed)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl QuestionSource for QuestionBank {
    fn fetch_random_question(&mut self) -> Result<Question, QuestionError> {
        self.questions
            .choose(&mut self.rng)
            .cloned()
            .ok_or(QuestionError::EmptyBank)
    }

    fn fetch_random_question_by_category(
        &mut self,
        category: Category,
    ) -> Result<Question, QuestionError> {
        if self.questions.is_empty() {
            return Err(QuestionError::EmptyBank);
        }
        let matching: Vec<&Question> = self
            .questions
            .iter()
            .filter(|q| q.category == Some(category))
            .collect();
        matching
            .choose(&mut self.rng)
            .map(|q| (*q).clone())
            .ok_or(QuestionError::NoQuestionForCategory(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_covers_every_question_category() {
        let mut bank = QuestionBank::sample(1);
        for category in Category::QUESTION {
            let question = bank.fetch_random_question_by_category(category).unwrap();
            assert_eq!(question.category, Some(category));
        }
    }

    #[test]
    fn empty_bank_reports_it() {
        let mut bank = QuestionBank::new(Vec::new(), 1);
        assert!(matches!(
            bank.fetch_random_question(),
            Err(QuestionError::EmptyBank)
        ));
        assert!(matches!(
            bank.fetch_random_question_by_category(Category::Calcul),
            Err(QuestionError::EmptyBank)
        ));
    }

    #[test]
    fn missing_category_is_an_error() {
        let mut bank = QuestionBank::new(
            vec![Question::new("1+1", "2", AnswerKind::Rcv).with_category(Category::Calcul)],
            1,
        );
        assert!(matches!(
            bank.fetch_random_question_by_category(Category::Geometrie),
            Err(QuestionError::NoQuestionForCategory(Category::Geometrie))
        ));
    }

    #[test]
    fn loads_from_json() {
        let json = r#"[
            { "question": "1+1", "reponse": "2", "typeReponse": "RCV", "category": "CALCUL" }
        ]"#;
        let bank = QuestionBank::from_json(json, 3).unwrap();
        assert_eq!(bank.len(), 1);
    }
}
