use crate::board::TileId;
use crate::bots::{Bot, CategoryHunterBot, RandomBot, ScholarBot};
use crate::game::round::Round;
use crate::question::Question;

pub struct CliBot {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const CLI_BOTS: &[CliBot] = &[
    CliBot {
        code: "R",
        name: "RandomBot",
        description: "Moves and answers at random.",
    },
    CliBot {
        code: "S",
        name: "ScholarBot",
        description: "Knows the answer with a given accuracy, guesses otherwise. First param is ACCURACY (0..1).",
    },
    CliBot {
        code: "H",
        name: "CategoryHunterBot",
        description: "Heads for categories it has not scored in yet, answers like ScholarBot. First param is ACCURACY.",
    },
];

#[derive(Debug, Clone)]
pub enum BotInstance {
    Random(RandomBot),
    Scholar(ScholarBot),
    Hunter(CategoryHunterBot),
}

impl BotInstance {
    pub fn label(&self) -> &'static str {
        match self {
            BotInstance::Random(_) => "Random",
            BotInstance::Scholar(_) => "Scholar",
            BotInstance::Hunter(_) => "Hunter",
        }
    }
}

impl Bot for BotInstance {
    fn choose_tile(&self, round: &Round, options: &[TileId]) -> Option<TileId> {
        match self {
            BotInstance::Random(b) => b.choose_tile(round, options),
            BotInstance::Scholar(b) => b.choose_tile(round, options),
            BotInstance::Hunter(b) => b.choose_tile(round, options),
        }
    }

    fn answer(&self, question: &Question, candidates: &[String]) -> String {
        match self {
            BotInstance::Random(b) => b.answer(question, candidates),
            BotInstance::Scholar(b) => b.answer(question, candidates),
            BotInstance::Hunter(b) => b.answer(question, candidates),
        }
    }
}

pub fn create_bot(code: &str, params: &[&str]) -> Option<BotInstance> {
    let accuracy = params.first().and_then(|s| s.parse::<f64>().ok());
    match code {
        "R" => Some(BotInstance::Random(RandomBot)),
        "S" => Some(BotInstance::Scholar(ScholarBot::new(accuracy))),
        "H" => Some(BotInstance::Hunter(CategoryHunterBot::new(accuracy))),
        _ => None,
    }
}

pub fn print_bot_help() {
    println!("Bot Legend:");
    println!("{:<5} {:<20} {}", "CODE", "BOT", "DESCRIPTION");
    println!("{}", "-".repeat(80));
    for bot in CLI_BOTS {
        println!("{:<5} {:<20} {}", bot.code, bot.name, bot.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_code_creates_a_bot() {
        for bot in CLI_BOTS {
            assert!(create_bot(bot.code, &[]).is_some(), "code {}", bot.code);
        }
        assert!(create_bot("Z", &[]).is_none());
    }

    #[test]
    fn accuracy_param_is_parsed() {
        match create_bot("S", &["0.25"]) {
            Some(BotInstance::Scholar(bot)) => assert_eq!(bot.accuracy, 0.25),
            other => panic!("unexpected bot {other:?}"),
        }
    }
}
