pub mod bank;
pub mod manager;

use serde::{Deserialize, Serialize};

use crate::types::{AnswerKind, Category};

pub use bank::QuestionBank;
pub use manager::QuestionManager;

/// Separator between the answers listed in [`Question::reponse`].
pub const ANSWER_SEPARATOR: char = '|';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub reponse: String,
    #[serde(rename = "typeReponse")]
    pub type_reponse: AnswerKind,
    #[serde(default)]
    pub correction: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
}

impl Question {
    pub fn new(question: impl Into<String>, reponse: impl Into<String>, kind: AnswerKind) -> Self {
        Self {
            question: question.into(),
            reponse: reponse.into(),
            type_reponse: kind,
            correction: None,
            image: None,
            category: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Listed answers, trimmed, empty entries dropped.
    pub fn answers(&self) -> Vec<String> {
        self.reponse
            .split(ANSWER_SEPARATOR)
            .map(str::trim)
            .filter(|answer| !answer.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QuestionError {
    #[error("no question loaded")]
    NoQuestion,
    #[error("question bank is empty")]
    EmptyBank,
    #[error("no question for category {0}")]
    NoQuestionForCategory(Category),
    #[error("question has no answer")]
    NoAnswer,
    #[error("failed to read questions: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse questions: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where questions come from.
pub trait QuestionSource {
    fn fetch_random_question(&mut self) -> Result<Question, QuestionError>;

    fn fetch_random_question_by_category(
        &mut self,
        category: Category,
    ) -> Result<Question, QuestionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_are_split_and_trimmed() {
        let question = Question::new("2+2 ?", " 4 | 3|5 |", AnswerKind::Qcm);
        assert_eq!(question.answers(), vec!["4", "3", "5"]);
    }

    #[test]
    fn parses_api_payload() {
        let json = r#"{
            "question": "Le carré est-il un rectangle ?",
            "reponse": "Vrai",
            "typeReponse": "VF",
            "correction": "Quatre angles droits.",
            "image": null,
            "category": "GEOMETRIE"
        }"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.type_reponse, AnswerKind::Vf);
        assert_eq!(question.category, Some(Category::Geometrie));
        assert!(question.image.is_none());
    }
}
