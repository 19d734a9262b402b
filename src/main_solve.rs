// Copyright (C) 2020-2026 Andy Kurnia.

use wordgrid::{dictionary, error, grid, normalize, return_error, round, scoring};

static USAGE: &str = "usage: solve WORDLIST BOARD [--points FILE] [--length-bonus FILE] [--variant JSON]
  BOARD is a file or inline text: a JSON array of tiles, or tokens like
  \"Qu I:DL T E / S A:TW B C / ...\" (LABEL or LABEL:DL|TL|DW|TW, / between rows)";

// inline text, or the contents of a file by that name.
fn read_board(arg: &str) -> error::Returns<grid::Board> {
    match std::fs::read_to_string(arg) {
        Ok(text) => grid::Board::from_text(&text),
        Err(_) => grid::Board::from_text(arg),
    }
}

#[tokio::main]
async fn main() -> error::Returns<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = std::env::args().collect::<Vec<_>>();
    let mut positional = Vec::new();
    let mut points_path = "data/points.csv".to_string();
    let mut length_bonus_path = "data/length_bonus.csv".to_string();
    let mut variant = scoring::RuleVariant::Default;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--points" | "--length-bonus" | "--variant" if i + 1 >= args.len() => {
                return_error!(format!("{} needs an argument\n{}", args[i], USAGE));
            }
            "--points" => {
                points_path = args[i + 1].clone();
                i += 1;
            }
            "--length-bonus" => {
                length_bonus_path = args[i + 1].clone();
                i += 1;
            }
            "--variant" => {
                variant = serde_json::from_str(&args[i + 1])?;
                i += 1;
            }
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            _ => positional.push(args[i].clone()),
        }
        i += 1;
    }
    if positional.len() != 2 {
        return_error!(USAGE.to_string());
    }

    let dictionary = dictionary::Dictionary::load(&normalize::Normalizer::default(), &positional[0])?;
    let board = read_board(&positional[1])?;
    let rules = scoring::ScoringRules::load(&points_path, &length_bonus_path)?;
    log::info!(
        "{} words, {}x{} board, {:?}",
        dictionary.len(),
        board.side(),
        board.side(),
        variant
    );

    let handle = round::RoundAnalysis {
        board: std::sync::Arc::new(board),
        dictionary: std::sync::Arc::new(dictionary),
        rules: std::sync::Arc::new(rules),
        variant,
    }
    .spawn();
    match handle.join().await? {
        Some(summary) => println!("{}", serde_json::to_string_pretty(&summary)?),
        None => {
            return_error!("round analysis was cancelled".to_string());
        }
    }
    Ok(())
}
