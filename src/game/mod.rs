pub mod action;
pub mod clock;
pub mod config;
pub mod game;
pub mod players;
pub mod round;

pub use action::{Action, ActionKind, FLASH_TIME_LIMIT, PointDelta, TurnContext};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, RoundConfig};
pub use game::{Game, GameError};
pub use players::{DEFAULT_REQUIRED_POINTS, Player, PlayerError};
pub use round::{Move, Round, RoundError, RoundEvent, TurnPhase};
