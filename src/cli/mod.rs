pub mod players;
pub mod stats;

pub use players::{BotInstance, CLI_BOTS, CliBot, create_bot, print_bot_help};
pub use stats::{GameStats, StatisticsAccumulator};
