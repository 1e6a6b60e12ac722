use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use mathsalamaison_rs::board::BoardLayout;
use mathsalamaison_rs::game::{Player, Round, RoundConfig, TurnPhase};
use mathsalamaison_rs::question::{QuestionBank, QuestionManager};
use mathsalamaison_rs::types::{AnswerKind, Category};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser, Clone)]
#[command(name = "mathsalamaison-play")]
#[command(about = "Play a hot-seat round of MathsALaMaison in the terminal")]
struct Args {
    /// Comma-separated player names
    #[arg(long, default_value = "Alice,Bob")]
    players: String,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Round configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board layout file (JSON). Defaults to the classic board
    #[arg(long)]
    board: Option<PathBuf>,

    /// Question bank file (JSON). Defaults to the built-in sample
    #[arg(long)]
    questions: Option<PathBuf>,

    /// Points needed to win
    #[arg(long)]
    required_points: Option<u32>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => RoundConfig::from_path(path)?,
        None => RoundConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(required_points) = args.required_points {
        config.required_points = required_points;
    }
    let layout = match &args.board {
        Some(path) => BoardLayout::from_path(path)?,
        None => BoardLayout::classic().clone(),
    };
    let bank = match &args.questions {
        Some(path) => QuestionBank::from_path(path, config.seed)?,
        None => QuestionBank::sample(config.seed),
    };
    let mut questions = QuestionManager::new(bank, config.seed);

    let mut round = Round::new(config, Some(&layout));
    for name in args.players.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        round.add_player(Player::new(name))?;
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("Points to win: {}", round.required_points());
    println!("{}", "=".repeat(80));

    loop {
        if round.turn() == TurnPhase::Idle {
            round.start_turn()?;
        }
        let name = round.current_player()?.name.clone();
        println!("\n--- Turn {}: {} ---", round.turn_number() + 1, name);

        let roll = round.roll_dice()?;
        let options = round.scan(roll)?;
        println!("Dice: {roll}");
        let tile = if options.is_empty() {
            println!("No tile at that distance, you stay put.");
            round
                .current_player()?
                .position
                .unwrap_or(round.board().first_tile())
        } else {
            for (idx, tile) in options.iter().enumerate() {
                let category = round.board().category(*tile).unwrap_or(Category::Centre);
                println!("  [{idx}] tile {tile} ({category})");
            }
            let choice = prompt_index(&mut input, "Where to?", options.len())?;
            options[choice]
        };

        let moved = round.move_tile(tile)?;
        println!("Landed on {}, action: {}", moved.category, moved.action);
        round.action()?;

        let question = if moved.category == Category::Centre {
            questions.fetch_random_question()?
        } else {
            questions.fetch_random_question_by_category(moved.category)?
        }
        .clone();
        println!("\n{}", question.question);

        let correct = match question.type_reponse {
            AnswerKind::Qcm | AnswerKind::Vf => {
                let candidates = questions.possible_answers().to_vec();
                for (idx, candidate) in candidates.iter().enumerate() {
                    println!("  [{idx}] {candidate}");
                }
                let choice = prompt_index(&mut input, "Your answer?", candidates.len())?;
                questions.check_selection_answer(&candidates[choice])?
            }
            AnswerKind::Rds | AnswerKind::Rcv => {
                let reply = prompt(&mut input, "Your answer?")?;
                questions.check_text_answer(&reply)?
            }
        };
        if correct {
            println!("Correct!");
        } else {
            println!(
                "Wrong, expected: {}",
                questions.correct_answer().unwrap_or_default()
            );
            if let Some(correction) = &question.correction {
                println!("{correction}");
            }
        }

        round.avoir_question(question.category.unwrap_or(moved.category))?;
        let over = round.post_answer(correct)?;
        for player in round.players() {
            println!("  {:<15} {:>3} pts", player.name, player.points);
        }
        if over {
            break;
        }
    }

    if let Some(winner) = round.winner() {
        println!("\n{}", "=".repeat(80));
        println!("{} wins!", winner.name);
        println!("{}", "=".repeat(80));
    }
    Ok(())
}

fn prompt(input: &mut impl BufRead, message: &str) -> io::Result<String> {
    print!("{message} ");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_owned())
}

fn prompt_index(input: &mut impl BufRead, message: &str, len: usize) -> io::Result<usize> {
    loop {
        let line = prompt(input, message)?;
        match line.parse::<usize>() {
            Ok(idx) if idx < len => return Ok(idx),
            _ => println!("Pick a number between 0 and {}", len - 1),
        }
    }
}
