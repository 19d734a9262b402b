// Copyright (C) 2020-2026 Andy Kurnia.

use wordgrid::{dictionary, display, error, grid, normalize, path_finder, round, scoring};

// https://github.com/kkawakam/rustyline/blob/master/examples/example.rs
#[derive(
    rustyline_derive::Completer,
    rustyline_derive::Helper,
    rustyline_derive::Highlighter,
    rustyline_derive::Hinter,
    rustyline_derive::Validator,
)]
struct ShellHelper {
    #[rustyline(Completer)]
    completer: rustyline::completion::FilenameCompleter,
    #[rustyline(Hinter)]
    hinter: rustyline::hint::HistoryHinter,
}

static HELP: &str = "\
dict FILE             load a word list, one word per line
points FILE FILE      load letter points and length bonus csv
board [TILES...]      set the board (LABEL or LABEL:DL|TL|DW|TW, / between rows) or show it
variant [JSON]        set or show the rule variant, e.g. '{\"kind\":\"BonusLetter\",\"letter\":\"A\",\"score\":20}'
tile CELL             face value of the tile at CELL (0-based index)
find WORD...          best path and score for each word
score CELL...         spell and score an explicit path
solve [N]             all words on the board, top N by score (default 20)
source FILE           run commands from a file
help                  this text
exit";

struct Shell {
    normalizer: normalize::Normalizer,
    dictionary: std::sync::Arc<dictionary::Dictionary>,
    rules: std::sync::Arc<scoring::ScoringRules>,
    variant: scoring::RuleVariant,
    board: Option<std::sync::Arc<grid::Board>>,
    runtime: tokio::runtime::Runtime,
}

impl Shell {
    fn board(&self) -> error::Returns<&grid::Board> {
        self.board
            .as_deref()
            .ok_or_else(|| "no board yet, use: board TILES...".into())
    }

    fn describe(&self, board: &grid::Board, word: &str, path: &[usize]) {
        let bonuses = scoring::summarize_bonuses(path, board);
        println!(
            "{} {} = {} points ({}DL {}TL {}DW {}TW)",
            word,
            display::format_path(board, path),
            self.rules.compute_score(word, path, board, &self.variant),
            bonuses.letter_double,
            bonuses.letter_triple,
            bonuses.word_double,
            bonuses.word_triple
        );
    }

    fn run(&mut self, strings: &[String]) -> error::Returns<()> {
        match strings[0].as_str() {
            "dict" => {
                let path = strings.get(1).ok_or("need a file")?;
                let dictionary = dictionary::Dictionary::load(&self.normalizer, path)?;
                println!("{} words", dictionary.len());
                self.dictionary = std::sync::Arc::new(dictionary);
            }
            "points" => {
                if strings.len() < 3 {
                    return Err("need two files".into());
                }
                self.rules = std::sync::Arc::new(scoring::ScoringRules::load(&strings[1], &strings[2])?);
                println!("{} tile scores", self.rules.points().len());
            }
            "board" => {
                if strings.len() > 1 {
                    let board = grid::Board::from_text(&strings[1..].join(" "))?;
                    for label in self.rules.validate_board(&board) {
                        println!("warning: no points for {}", label);
                    }
                    self.board = Some(std::sync::Arc::new(board));
                }
                let board = self.board()?;
                display::print_board(board);
                println!("{}", board);
            }
            "variant" => {
                if strings.len() > 1 {
                    self.variant = serde_json::from_str(&strings[1..].join(" "))?;
                }
                println!("{}", serde_json::to_string(&self.variant)?);
            }
            "tile" => {
                let board = self.board()?;
                let idx = strings.get(1).ok_or("need a cell")?.parse::<usize>()?;
                if idx >= board.len() {
                    return Err(format!("cell {} is off the board", idx).into());
                }
                let tile = board.tile(idx);
                println!("{} {}", tile.letter, self.rules.tile_score(tile));
            }
            "find" => {
                let board = self.board()?;
                let mut path_finder = path_finder::PathFinder::new(board, &self.rules, &self.variant);
                for raw_word in &strings[1..] {
                    let word = self.normalizer.normalize(raw_word);
                    if !self.dictionary.is_empty() && !self.dictionary.contains(&word) {
                        println!("{} is not in the dictionary", word);
                    }
                    match path_finder.find(&word) {
                        Some(path) => {
                            self.describe(board, &word, &path);
                            display::print_path(board, &path);
                        }
                        None => println!("{} cannot be traced", word),
                    }
                }
            }
            "score" => {
                let board = self.board()?;
                let path = strings[1..]
                    .iter()
                    .map(|s| s.parse::<usize>())
                    .collect::<Result<Vec<_>, _>>()?;
                if !board.is_valid_path(&path) {
                    return Err("not a path: cells must be distinct and adjacent".into());
                }
                let word = board.spell(&path);
                self.describe(board, &word, &path);
            }
            "solve" => {
                let board = std::sync::Arc::clone(
                    self.board
                        .as_ref()
                        .ok_or("no board yet, use: board TILES...")?,
                );
                let top = match strings.get(1) {
                    Some(s) => s.parse::<usize>()?,
                    None => 20,
                };
                let handle = round::RoundAnalysis {
                    board: std::sync::Arc::clone(&board),
                    dictionary: std::sync::Arc::clone(&self.dictionary),
                    rules: std::sync::Arc::clone(&self.rules),
                    variant: self.variant.clone(),
                }
                .spawn_on(self.runtime.handle());
                let Some(summary) = self.runtime.block_on(handle.join())? else {
                    println!("cancelled");
                    return Ok(());
                };
                let mut words = summary.words.iter().collect::<Vec<_>>();
                words.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.word.cmp(&b.word)));
                for found_word in words.into_iter().take(top) {
                    self.describe(&board, &found_word.word, &found_word.path);
                }
                println!(
                    "{} words, {} points, longest {}",
                    summary.total_words,
                    summary.total_points,
                    summary.longest_word.as_deref().unwrap_or("-")
                );
                for (len, count) in summary.words_per_length.iter() {
                    println!("  {:2} letters: {}", len, count);
                }
            }
            _ => {
                return Err("invalid input, help for help".into());
            }
        }
        Ok(())
    }
}

fn main() -> error::Returns<()> {
    env_logger::init();
    let mut shell = Shell {
        normalizer: normalize::Normalizer::default(),
        dictionary: std::sync::Arc::new(dictionary::Dictionary::new()),
        rules: std::sync::Arc::new(
            scoring::ScoringRules::load("data/points.csv", "data/length_bonus.csv")
                .unwrap_or_default(),
        ),
        variant: scoring::RuleVariant::Default,
        board: None,
        runtime: tokio::runtime::Runtime::new()?,
    };
    let mut rl = rustyline::Editor::<ShellHelper, rustyline::history::DefaultHistory>::new()?;
    rl.set_helper(Some(ShellHelper {
        completer: rustyline::completion::FilenameCompleter::new(),
        hinter: rustyline::hint::HistoryHinter::new(),
    }));
    let mut cmd_stack = Vec::<(String, Option<(String, usize)>)>::new();
    loop {
        if let Some((line, source)) = cmd_stack.pop() {
            if let Some((filename, line_num)) = source {
                println!("{}:{}> {}", filename, line_num, line);
            }
            match shell_words::split(&line) {
                Ok(strings) => {
                    if !strings.is_empty() {
                        match strings[0].as_str() {
                            "help" => {
                                println!("{}", HELP);
                            }
                            "exit" => {
                                break;
                            }
                            "source" => {
                                if strings.len() > 1 {
                                    match std::fs::read_to_string(&strings[1]) {
                                        Ok(whole_file) => {
                                            let v = cmd_stack.len();
                                            for (line_num, line) in whole_file.lines().enumerate() {
                                                cmd_stack.push((
                                                    line.to_string(),
                                                    Some((strings[1].clone(), line_num + 1)),
                                                ));
                                            }
                                            cmd_stack[v..].reverse();
                                        }
                                        Err(err) => {
                                            println!("cannot open file: {:?}", err);
                                        }
                                    }
                                } else {
                                    println!("need another arg");
                                }
                            }
                            _ => {
                                if let Err(err) = shell.run(&strings) {
                                    println!("{}", err);
                                }
                            }
                        }
                    }
                }
                Err(err) => {
                    println!("Bad quoting: {:?}", err);
                }
            }
        } else {
            match rl.readline(">> ") {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    cmd_stack.push((line, None));
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }
    }

    Ok(())
}
