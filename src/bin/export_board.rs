use std::process::ExitCode;

use mathsalamaison_rs::board::{Board, BoardLayout};

/// Prints the classic board, or the layout given as first argument, as JSON.
/// With `--text` the adjacency list is printed instead.
fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let text = args.iter().any(|a| a == "--text");
    let path = args.iter().find(|a| !a.starts_with("--"));

    let layout = match path {
        Some(path) => match BoardLayout::from_path(path) {
            Ok(layout) => layout,
            Err(err) => {
                eprintln!("Error: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => BoardLayout::classic().clone(),
    };

    let board = match Board::load_from_layout(&layout, mathsalamaison_rs::board::DEFAULT_DICE_MAX) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if text {
        print!("{board}");
        return ExitCode::SUCCESS;
    }
    match serde_json::to_string_pretty(&board.to_layout()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
