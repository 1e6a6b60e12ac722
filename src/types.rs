use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Centre,
    Transformation,
    Nombres,
    Geometrie,
    Calcul,
    Fonctions,
    Probabilites,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Centre,
        Category::Transformation,
        Category::Nombres,
        Category::Geometrie,
        Category::Calcul,
        Category::Fonctions,
        Category::Probabilites,
    ];

    /// Categories a question can be asked about. The centre is a board zone only.
    pub const QUESTION: [Category; 6] = [
        Category::Transformation,
        Category::Nombres,
        Category::Geometrie,
        Category::Calcul,
        Category::Fonctions,
        Category::Probabilites,
    ];

    pub const fn index(self) -> usize {
        match self {
            Category::Centre => 0,
            Category::Transformation => 1,
            Category::Nombres => 2,
            Category::Geometrie => 3,
            Category::Calcul => 4,
            Category::Fonctions => 5,
            Category::Probabilites => 6,
        }
    }
}

/// How a question expects to be answered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
pub enum AnswerKind {
    /// Multiple choice, the first listed answer is the correct one.
    #[serde(rename = "QCM")]
    #[strum(serialize = "QCM")]
    Qcm,
    /// True or false.
    #[serde(rename = "VF")]
    #[strum(serialize = "VF")]
    Vf,
    /// Free text, any listed answer is accepted.
    #[serde(rename = "RDS")]
    #[strum(serialize = "RDS")]
    Rds,
    /// Numeric text, any listed answer is accepted.
    #[serde(rename = "RCV")]
    #[strum(serialize = "RCV")]
    Rcv,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn category_indices_follow_declaration_order() {
        for (expected, category) in Category::iter().enumerate() {
            assert_eq!(category.index(), expected);
            assert_eq!(Category::ALL[expected], category);
        }
    }

    #[test]
    fn question_categories_exclude_centre() {
        assert!(!Category::QUESTION.contains(&Category::Centre));
        assert_eq!(Category::QUESTION.len() + 1, Category::ALL.len());
    }

    #[test]
    fn answer_kind_parses_wire_codes() {
        assert_eq!(AnswerKind::from_str("QCM").unwrap(), AnswerKind::Qcm);
        assert_eq!(AnswerKind::from_str("RCV").unwrap(), AnswerKind::Rcv);
        assert_eq!(AnswerKind::Vf.to_string(), "VF");
        let parsed: AnswerKind = serde_json::from_str("\"RDS\"").unwrap();
        assert_eq!(parsed, AnswerKind::Rds);
    }

    #[test]
    fn category_round_trips_through_strings() {
        assert_eq!(Category::Geometrie.to_string(), "GEOMETRIE");
        assert_eq!(Category::from_str("NOMBRES").unwrap(), Category::Nombres);
    }
}
