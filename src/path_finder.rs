// Copyright (C) 2020-2026 Andy Kurnia.

use super::{grid, matrix, scoring, solver};

struct Env<'a> {
    board: &'a grid::Board,
    adjacency: &'a matrix::Adjacency,
    scorer: &'a scoring::Scorer<'a>,
    cancel: Option<&'a solver::CancelToken>,
    visited: &'a mut matrix::CellSet,
    path: &'a mut Vec<usize>,
    best: Option<(i32, grid::Path)>,
    num_paths: u64,
    num_nodes: u32,
    cancelled: bool,
}

// rest is the part of the word not yet spelled by path.
fn extend(env: &mut Env<'_>, idx: usize, rest: &str) {
    env.num_nodes = env.num_nodes.wrapping_add(1);
    if env.num_nodes & solver::CANCEL_POLL_MASK == 0 {
        if let Some(cancel) = env.cancel {
            env.cancelled |= cancel.is_cancelled();
        }
    }
    if env.cancelled {
        return;
    }
    let Some(rest) = rest.strip_prefix(env.board.label(idx)) else {
        return;
    };
    env.visited.insert(idx);
    env.path.push(idx);
    if rest.is_empty() {
        env.num_paths += 1;
        let score = env.scorer.score(&env.path[..], env.board);
        // strictly greater, so the first path found keeps a tie.
        if env.best.as_ref().is_none_or(|(best_score, _)| score > *best_score) {
            env.best = Some((score, env.path.to_vec()));
        }
    } else {
        let adjacency = env.adjacency;
        for &next in adjacency.of(idx) {
            if env.cancelled {
                break;
            }
            let next = next as usize;
            if !env.visited.contains(next) {
                extend(env, next, rest);
            }
        }
    }
    env.path.pop();
    env.visited.remove(idx);
}

// Reusable for many words on one board under one variant.
pub struct PathFinder<'a> {
    board: &'a grid::Board,
    adjacency: matrix::Adjacency,
    scorer: scoring::Scorer<'a>,
    cancel: Option<&'a solver::CancelToken>,
    visited: matrix::CellSet,
    path: Vec<usize>,
}

impl<'a> PathFinder<'a> {
    pub fn new(
        board: &'a grid::Board,
        rules: &'a scoring::ScoringRules,
        variant: &scoring::RuleVariant,
    ) -> Self {
        Self {
            board,
            adjacency: matrix::Adjacency::new(board.dim()),
            scorer: rules.scorer(variant),
            cancel: None,
            visited: matrix::CellSet::new(board.len()),
            path: Vec::new(),
        }
    }

    // find gives up and returns None once cancel is set.
    pub fn with_cancel(mut self, cancel: &'a solver::CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    // Tries every path spelling word and keeps the highest-scoring one.
    // word must be normalized. None if the board cannot spell it.
    pub fn find(&mut self, word: &str) -> Option<grid::Path> {
        if word.is_empty() {
            return None;
        }
        let mut env = Env {
            board: self.board,
            adjacency: &self.adjacency,
            scorer: &self.scorer,
            cancel: self.cancel,
            visited: &mut self.visited,
            path: &mut self.path,
            best: None,
            num_paths: 0,
            num_nodes: 0,
            cancelled: false,
        };
        for start in 0..self.board.len() {
            extend(&mut env, start, word);
        }
        if env.cancelled {
            log::trace!("{}: cancelled after {} paths", word, env.num_paths);
            return None;
        }
        log::trace!(
            "{}: {} paths, best {:?}",
            word,
            env.num_paths,
            env.best.as_ref().map(|(score, _)| score)
        );
        env.best.map(|(_, path)| path)
    }
}

pub fn find_best_path_for_word(
    board: &grid::Board,
    word: &str,
    rules: &scoring::ScoringRules,
    variant: &scoring::RuleVariant,
) -> Option<grid::Path> {
    PathFinder::new(board, rules, variant).find(word)
}
