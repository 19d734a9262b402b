// Copyright (C) 2020-2026 Andy Kurnia.

// Per-round analysis: prefilter, index, full solve, then best-path pricing.
// Runs on a blocking thread so callers on an async executor stay responsive,
// and can be abandoned when a newer round supersedes it.

use super::{dictionary, error, grid, path_finder, prefilter, scoring, solver, stats};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FoundWord {
    pub word: String,
    pub path: grid::Path,
    pub score: i32,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct RoundSummary {
    // sorted by word.
    pub words: Vec<FoundWord>,
    pub total_words: usize,
    pub total_points: i64,
    pub longest_word: Option<String>,
    // spelled length to number of words.
    pub words_per_length: std::collections::BTreeMap<usize, usize>,
    pub mean_score: f64,
    pub max_score: i32,
}

impl RoundSummary {
    fn new(words: Vec<FoundWord>) -> Self {
        let mut total_points = 0i64;
        let mut longest: Option<(usize, &str)> = None;
        let mut words_per_length = std::collections::BTreeMap::new();
        let mut score_stats = stats::Stats::new();
        let mut max_score = 0;
        for found_word in words.iter() {
            let len = found_word.word.chars().count();
            total_points += found_word.score as i64;
            *words_per_length.entry(len).or_insert(0) += 1;
            score_stats.update(found_word.score as f64);
            max_score = max_score.max(found_word.score);
            if longest.is_none_or(|(longest_len, _)| len > longest_len) {
                longest = Some((len, found_word.word.as_str()));
            }
        }
        let longest_word = longest.map(|(_, word)| word.to_string());
        Self {
            total_words: words.len(),
            total_points,
            longest_word,
            words_per_length,
            mean_score: score_stats.mean(),
            max_score,
            words,
        }
    }
}

// Synchronous body of a round. None if cancel was observed.
pub fn analyze(
    board: &grid::Board,
    dictionary: &dictionary::Dictionary,
    rules: &scoring::ScoringRules,
    variant: &scoring::RuleVariant,
    cancel: &solver::CancelToken,
) -> error::Returns<Option<RoundSummary>> {
    let t0 = std::time::Instant::now();
    rules.validate_board(board);
    let candidates = prefilter::filter_dictionary(dictionary, board)?;
    let Some(found) = solver::solve_all_with_cancel(board, &candidates, cancel)? else {
        return Ok(None);
    };
    let mut path_finder = path_finder::PathFinder::new(board, rules, variant).with_cancel(cancel);
    let scorer = rules.scorer(variant);
    let mut words = Vec::with_capacity(found.len());
    for (word, first_path) in found {
        let best_path = path_finder.find(&word);
        if cancel.is_cancelled() {
            log::debug!("round analysis cancelled after {:?}", t0.elapsed());
            return Ok(None);
        }
        let path = best_path.unwrap_or(first_path);
        let score = scorer.score(&path, board);
        words.push(FoundWord { word, path, score });
    }
    let summary = RoundSummary::new(words);
    log::debug!(
        "round: {} words, {} points, {:?}",
        summary.total_words,
        summary.total_points,
        t0.elapsed()
    );
    Ok(Some(summary))
}

pub struct RoundHandle {
    cancel: solver::CancelToken,
    task: tokio::task::JoinHandle<error::Returns<Option<RoundSummary>>>,
}

impl RoundHandle {
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> &solver::CancelToken {
        &self.cancel
    }

    // None if the round was cancelled before it finished.
    pub async fn join(self) -> error::Returns<Option<RoundSummary>> {
        self.task.await?
    }
}

// Inputs for one round, shared with the blocking worker.
#[derive(Clone)]
pub struct RoundAnalysis {
    pub board: std::sync::Arc<grid::Board>,
    pub dictionary: std::sync::Arc<dictionary::Dictionary>,
    pub rules: std::sync::Arc<scoring::ScoringRules>,
    pub variant: scoring::RuleVariant,
}

impl RoundAnalysis {
    // Must be called from within a tokio runtime.
    pub fn spawn(self) -> RoundHandle {
        self.spawn_on(&tokio::runtime::Handle::current())
    }

    pub fn spawn_on(self, runtime: &tokio::runtime::Handle) -> RoundHandle {
        let cancel = solver::CancelToken::new();
        let worker_cancel = cancel.clone();
        let task = runtime.spawn_blocking(move || {
            analyze(
                &self.board,
                &self.dictionary,
                &self.rules,
                &self.variant,
                &worker_cancel,
            )
        });
        RoundHandle { cancel, task }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{alphabet, normalize};

    fn rules() -> scoring::ScoringRules {
        scoring::ScoringRules::new(
            alphabet::PointTable::new([("A", 1), ("B", 3), ("C", 3), ("D", 2), ("E", 1)])
                .unwrap(),
            alphabet::LengthBonus::new([(4, 2)]).unwrap(),
        )
    }

    fn dict(words: &[&str]) -> dictionary::Dictionary {
        dictionary::Dictionary::from_words(&normalize::Normalizer::default(), words)
    }

    #[test]
    fn test_analyze() {
        let board = grid::Board::parse("A B:DL C:DW D").unwrap();
        let summary = analyze(
            &board,
            &dict(&["ab", "abc", "abcd", "bad", "ax", "cab"]),
            &rules(),
            &scoring::RuleVariant::Default,
            &solver::CancelToken::new(),
        )
        .unwrap()
        .unwrap();
        let words = summary.words.iter().map(|w| w.word.as_str()).collect::<Vec<_>>();
        assert_eq!(words, ["AB", "ABC", "ABCD", "BAD", "CAB"]);
        assert_eq!(summary.total_words, 5);
        // AB 1+6, ABC (1+6+3)*2, ABCD (1+6+3+2)*2+2, BAD 6+1+2, CAB (3+1+6)*2
        assert_eq!(summary.words[0].score, 7);
        assert_eq!(summary.words[1].score, 20);
        assert_eq!(summary.words[2].score, 26);
        assert_eq!(summary.words[3].score, 9);
        assert_eq!(summary.words[4].score, 20);
        assert_eq!(summary.total_points, 82);
        assert_eq!(summary.max_score, 26);
        assert_eq!(summary.longest_word.as_deref(), Some("ABCD"));
        assert_eq!(summary.words_per_length[&2], 1);
        assert_eq!(summary.words_per_length[&3], 3);
        assert_eq!(summary.words_per_length[&4], 1);
        for found_word in summary.words.iter() {
            assert!(board.is_valid_path(&found_word.path));
            assert_eq!(board.spell(&found_word.path), found_word.word);
        }
    }

    #[test]
    fn test_analyze_empty() {
        let board = grid::Board::parse("").unwrap();
        let summary = analyze(
            &board,
            &dict(&["ab"]),
            &rules(),
            &scoring::RuleVariant::Default,
            &solver::CancelToken::new(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(summary.total_words, 0);
        assert_eq!(summary.total_points, 0);
        assert_eq!(summary.longest_word, None);
    }

    #[test]
    fn test_analyze_cancelled() {
        let board = grid::Board::parse("A B C D").unwrap();
        let cancel = solver::CancelToken::new();
        cancel.cancel();
        assert!(
            analyze(&board, &dict(&["ab"]), &rules(), &scoring::RuleVariant::Default, &cancel)
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_spawn() {
        let analysis = RoundAnalysis {
            board: std::sync::Arc::new(grid::Board::parse("A B C D").unwrap()),
            dictionary: std::sync::Arc::new(dict(&["ab", "cab", "dab"])),
            rules: std::sync::Arc::new(rules()),
            variant: scoring::RuleVariant::FixedWord { score: 3 },
        };
        let summary = analysis.spawn().join().await.unwrap().unwrap();
        assert_eq!(summary.total_words, 3);
        assert_eq!(summary.total_points, 9);
    }
}
