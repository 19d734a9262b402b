// Copyright (C) 2020-2026 Andy Kurnia.

use rand::prelude::*;
use wordgrid::{
    dictionary, error, grid, normalize, path_finder, prefilter, return_error, scoring, solver,
    stats,
};

// Roughly the letter mix of classic dice. Only for making test boards.
static LETTERS: &[&str] = &[
    "E", "E", "E", "E", "E", "E", "E", "E", "E", "E", "E", "A", "A", "A", "A", "A", "A", "A",
    "A", "I", "I", "I", "I", "I", "I", "O", "O", "O", "O", "O", "O", "N", "N", "N", "N", "N",
    "R", "R", "R", "R", "R", "T", "T", "T", "T", "T", "L", "L", "L", "L", "S", "S", "S", "S",
    "S", "U", "U", "U", "D", "D", "D", "G", "G", "B", "B", "C", "C", "M", "M", "P", "P", "F",
    "F", "H", "H", "V", "W", "W", "Y", "Y", "K", "J", "X", "Qu", "Z",
];

static BONUSES: &[grid::Bonus] = &[
    grid::Bonus::LetterDouble,
    grid::Bonus::LetterDouble,
    grid::Bonus::LetterTriple,
    grid::Bonus::WordDouble,
    grid::Bonus::WordTriple,
];

fn random_board(rng: &mut rand_chacha::ChaCha20Rng, side: usize) -> error::Returns<grid::Board> {
    let tiles = (0..side * side)
        .map(|_| {
            let letter = LETTERS[rng.random_range(0..LETTERS.len())];
            let bonus = if rng.random_range(0..8) == 0 {
                Some(BONUSES[rng.random_range(0..BONUSES.len())])
            } else {
                None
            };
            grid::Tile::new(letter, bonus)
        })
        .collect::<Vec<_>>();
    grid::Board::with_side(side, tiles)
}

#[derive(Default)]
struct Tally {
    solve_ms: stats::Stats,
    words: stats::Stats,
    candidates: stats::Stats,
    mismatches: usize,
}

// Solver and path finder must agree on which candidates are traceable, and
// every path must be valid and spell its word.
fn cross_check(
    board: &grid::Board,
    candidates: &dictionary::Dictionary,
    found: &solver::SolveResult,
    rules: &scoring::ScoringRules,
) -> usize {
    let mut mismatches = 0;
    let mut path_finder = path_finder::PathFinder::new(board, rules, &scoring::RuleVariant::Default);
    for word in candidates.iter() {
        let best = path_finder.find(word);
        let first = found.get(word);
        let ok = match (&best, first) {
            (Some(best), Some(first)) => {
                board.is_valid_path(best)
                    && board.is_valid_path(first)
                    && board.spell(best) == word
                    && board.spell(first) == word
                    && rules.compute_score(word, best, board, &scoring::RuleVariant::Default)
                        >= rules.compute_score(word, first, board, &scoring::RuleVariant::Default)
            }
            (None, None) => true,
            _ => false,
        };
        if !ok {
            println!("mismatch on {}: {:?} vs {:?}", word, best, first);
            mismatches += 1;
        }
    }
    mismatches
}

fn main() -> error::Returns<()> {
    env_logger::init();
    let args = std::env::args().collect::<Vec<_>>();
    if args.len() < 2 {
        return_error!("usage: bench WORDLIST [NUM_BOARDS] [SIDE] [SEED]".to_string());
    }
    let num_boards = match args.get(2) {
        Some(s) => s.parse::<usize>()?,
        None => 100,
    };
    let side = match args.get(3) {
        Some(s) => s.parse::<usize>()?,
        None => 4,
    };
    let seed = match args.get(4) {
        Some(s) => s.parse::<u64>()?,
        None => 0,
    };
    let dictionary = std::sync::Arc::new(dictionary::Dictionary::load(
        &normalize::Normalizer::default(),
        &args[1],
    )?);
    let rules = std::sync::Arc::new(
        scoring::ScoringRules::load("data/points.csv", "data/length_bonus.csv")
            .unwrap_or_default(),
    );

    let t0 = std::time::Instant::now();
    let num_threads = num_cpus::get();
    let next_board = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let mut threads = vec![];
    let (tx, rx) = std::sync::mpsc::channel();
    for _ in 0..num_threads {
        let tx = tx.clone();
        let dictionary = std::sync::Arc::clone(&dictionary);
        let rules = std::sync::Arc::clone(&rules);
        let next_board = std::sync::Arc::clone(&next_board);
        threads.push(std::thread::spawn(move || -> error::Returns<()> {
            let mut tally = Tally::default();
            loop {
                let board_idx = next_board.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                if board_idx >= num_boards {
                    break;
                }
                let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(seed + board_idx as u64);
                let board = random_board(&mut rng, side)?;
                let t1 = std::time::Instant::now();
                let candidates = prefilter::filter_dictionary(&dictionary, &board)?;
                let found = solver::solve_all(&board, &candidates)?;
                tally.solve_ms.update(t1.elapsed().as_secs_f64() * 1000.0);
                tally.words.update(found.len() as f64);
                tally.candidates.update(candidates.len() as f64);
                tally.mismatches += cross_check(&board, &candidates, &found, &rules);
            }
            if tx.send(tally).is_err() {
                return_error!("result channel closed".to_string());
            }
            Ok(())
        }));
    }
    drop(tx);

    let mut total = Tally::default();
    for tally in rx {
        total.solve_ms.update_bulk(&tally.solve_ms);
        total.words.update_bulk(&tally.words);
        total.candidates.update_bulk(&tally.candidates);
        total.mismatches += tally.mismatches;
    }
    for thread in threads {
        match thread.join() {
            Ok(Err(e)) => println!("{}", e),
            Err(e) => println!("{:?}", e),
            Ok(Ok(())) => {}
        }
    }

    println!(
        "{} boards of side {} on {} threads in {:?}",
        total.solve_ms.count(),
        side,
        num_threads,
        t0.elapsed()
    );
    println!("solve ms:   {}", total.solve_ms);
    println!("candidates: {}", total.candidates);
    println!("words:      {}", total.words);
    println!("mismatches: {}", total.mismatches);
    if total.mismatches > 0 {
        return_error!(format!("{} mismatches", total.mismatches));
    }
    Ok(())
}
