#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod board;
pub mod bots;
pub mod cli;
pub mod game;
pub mod question;
pub mod types;

pub use board::{Board, BoardLayout, Tile, TileId};
pub use game::{Action, ActionKind, Game, Player, Round, RoundConfig, RoundError, TurnPhase};
pub use question::{Question, QuestionBank, QuestionManager, QuestionSource};
pub use types::{AnswerKind, Category};
