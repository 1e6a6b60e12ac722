use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use mathsalamaison_rs::board::BoardLayout;
use mathsalamaison_rs::cli::{BotInstance, StatisticsAccumulator, create_bot, print_bot_help};
use mathsalamaison_rs::game::{Game, Player, RoundConfig};
use mathsalamaison_rs::question::QuestionBank;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser, Clone)]
#[command(name = "mathsalamaison-sim")]
#[command(about = "MathsALaMaison Simulator - Simulate rounds between different bot strategies")]
struct Args {
    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 5)]
    num: u32,

    /// Comma-separated bot codes (e.g., R,S,H)
    /// Use ':' to set bot-specific params (e.g., S:0.9 for accuracy)
    /// Codes: R=Random, S=Scholar, H=CategoryHunter
    #[arg(long, default_value = "S,S,R,H")]
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

    /// Highest dice roll
    #[arg(long)]
    dice_max: Option<u32>,

    /// Points needed to win
    #[arg(long)]
    required_points: Option<u32>,

    /// Show bot codes and exit
    #[arg(long)]
    help_players: bool,

    /// Silence console output
    #[arg(long)]
    quiet: bool,

    /// Number of worker threads for parallel execution
    #[arg(long, default_value_t = 1)]
    workers: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if args.help_players {
        print_bot_help();
        return;
    }

    let bot_keys: Vec<&str> = args.players.split(',').collect();
    if bot_keys.is_empty() || bot_keys.len() > 8 {
        eprintln!("Error: Must specify 1-8 players");
        std::process::exit(1);
    }

    let mut bots: Vec<BotInstance> = Vec::new();
    for key in &bot_keys {
        let parts: Vec<&str> = key.split(':').collect();
        match create_bot(parts[0], &parts[1..]) {
            Some(bot) => bots.push(bot),
            None => {
                eprintln!("Error: Unknown bot code '{}'", parts[0]);
                eprintln!("Use --help-players to see available codes");
                std::process::exit(1);
            }
        }
    }

    let mut config = match &args.config {
        Some(path) => RoundConfig::from_path(path).unwrap_or_else(|err| {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }),
        None => RoundConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(dice_max) = args.dice_max {
        config.dice_max = dice_max;
    }
    if let Some(required_points) = args.required_points {
        config.required_points = required_points;
    }

    let layout = match &args.board {
        Some(path) => BoardLayout::from_path(path).unwrap_or_else(|err| {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }),
        None => BoardLayout::classic().clone(),
    };
    let bank = match &args.questions {
        Some(path) => QuestionBank::from_path(path, config.seed).unwrap_or_else(|err| {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }),
        None => QuestionBank::sample(config.seed),
    };

    let setup = Setup {
        config,
        layout,
        bank,
        bots,
    };

    let mut stats = StatisticsAccumulator::new();
    if args.workers > 1 {
        run_parallel_simulations(&args, &setup, &mut stats);
    } else {
        run_sequential_simulations(&args, &setup, &mut stats, 0, args.num);
    }

    if !args.quiet {
        print_summary(&stats, &setup.bots);
    }
}

#[derive(Clone)]
struct Setup {
    config: RoundConfig,
    layout: BoardLayout,
    bank: QuestionBank,
    bots: Vec<BotInstance>,
}

fn seat_names(bots: &[BotInstance]) -> Vec<String> {
    bots.iter()
        .enumerate()
        .map(|(idx, bot)| format!("{}#{}", bot.label(), idx + 1))
        .collect()
}

fn run_sequential_simulations(
    args: &Args,
    setup: &Setup,
    stats: &mut StatisticsAccumulator,
    first_game: u32,
    num_games: u32,
) {
    let names = seat_names(&setup.bots);
    for game_idx in first_game..first_game + num_games {
        let config = setup.config.for_game(game_idx);
        let players = names.iter().map(Player::new).collect();

        let start = Instant::now();
        let mut game = match Game::new(config, Some(&setup.layout), players, setup.bank.clone()) {
            Ok(game) => game,
            Err(err) => {
                eprintln!("Error: {err}");
                std::process::exit(1);
            }
        };
        let result = game.play(&setup.bots);
        let duration = start.elapsed();

        if let Err(err) = &result {
            tracing::error!(game = %game.id, error = %err, "game aborted");
        }
        stats.after(&game, duration);

        if !args.quiet {
            let last_n = 10;
            if game_idx < last_n || game_idx >= args.num.saturating_sub(last_n) {
                let winner = game
                    .winner()
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| "None".to_string());
                println!(
                    "Game {:>4}: Winner={:>10}, Turns={:>4}, Bar={:>3}, Duration={:?}",
                    game_idx + 1,
                    winner,
                    game.round.turn_number(),
                    game.round.required_points(),
                    duration
                );
            }
        }
    }
}

fn run_parallel_simulations(args: &Args, setup: &Setup, stats: &mut StatisticsAccumulator) {
    use std::sync::Arc;
    use std::thread;

    let setup = Arc::new(setup.clone());
    let args = Arc::new(args.clone());

    let workers = args.workers as u32;
    let games_per_worker = args.num / workers;
    let remainder = args.num % workers;

    let mut handles = Vec::new();
    for worker_id in 0..workers {
        let setup = Arc::clone(&setup);
        let args = Arc::clone(&args);
        let num_games = if worker_id < remainder {
            games_per_worker + 1
        } else {
            games_per_worker
        };
        let first_game = worker_id * games_per_worker + worker_id.min(remainder);

        handles.push(thread::spawn(move || {
            let mut local_stats = StatisticsAccumulator::new();
            let quiet_args = Args {
                quiet: true,
                ..(*args).clone()
            };
            run_sequential_simulations(&quiet_args, &setup, &mut local_stats, first_game, num_games);
            local_stats
        }));
    }

    for handle in handles {
        match handle.join() {
            Ok(worker_stats) => stats.stats.merge(worker_stats.stats),
            Err(_) => tracing::error!("simulation worker panicked"),
        }
    }
}

fn print_summary(stats: &StatisticsAccumulator, bots: &[BotInstance]) {
    println!("\n{}", "=".repeat(80));
    println!("SIMULATION SUMMARY");
    println!("{}", "=".repeat(80));

    println!("\nPlayer Summary:");
    println!(
        "{:<15} {:<10} {:<12} {:<12}",
        "Player", "Wins", "Win Rate", "Avg Points"
    );
    println!("{}", "-".repeat(50));

    for name in seat_names(bots) {
        let wins = stats.stats.wins.get(&name).copied().unwrap_or(0);
        let win_rate = if stats.stats.games > 0 {
            (f64::from(wins) / f64::from(stats.stats.games)) * 100.0
        } else {
            0.0
        };
        println!(
            "{:<15} {:<10} {:<11.1}% {:<12.2}",
            name,
            wins,
            win_rate,
            stats.stats.get_avg_points(&name)
        );
    }

    println!("\nGame Summary:");
    println!("  Total Games: {}", stats.stats.games);
    println!("  Unfinished: {}", stats.stats.unfinished);
    println!("  Tie-breaks: {}", stats.stats.total_ties);
    println!("  Avg Turns: {:.2}", stats.stats.get_avg_turns());
    println!("  Avg Duration: {:.2?}", stats.stats.get_avg_duration());
}
