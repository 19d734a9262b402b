// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, dictionary, error, grid, kwg, matrix, path_finder, scoring};

// Word to one path that spells it. Sorted so output is stable.
pub type SolveResult = std::collections::BTreeMap<String, grid::Path>;

// Shared flag for abandoning a search that is no longer wanted.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(std::sync::Arc<std::sync::atomic::AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, std::sync::atomic::Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(std::sync::atomic::Ordering::Relaxed)
    }
}

// how many dfs nodes between cancellation polls. power of two minus one.
pub(crate) const CANCEL_POLL_MASK: u32 = 0xfff;

// Candidates indexed by prefix over the board's own letters.
pub struct PrefixIndex {
    alphabet: alphabet::BoardAlphabet,
    kwg: kwg::Kwg,
}

impl PrefixIndex {
    // Words using a letter absent from the board are left out, since no path
    // could spell them.
    pub fn new(board: &grid::Board, candidates: &dictionary::Dictionary) -> error::Returns<Self> {
        let alphabet = alphabet::BoardAlphabet::new(board)?;
        let mut buf = Vec::new();
        let mut machine_words = Vec::<Box<[u8]>>::with_capacity(candidates.len());
        for word in candidates.iter() {
            if alphabet.encode_into(word, &mut buf) && !buf.is_empty() {
                machine_words.push(buf[..].into());
            }
        }
        machine_words.sort_unstable();
        machine_words.dedup();
        let kwg = kwg::Kwg::from_machine_words(&machine_words)?;
        log::debug!(
            "prefix index: {} of {} candidates, {} nodes",
            machine_words.len(),
            candidates.len(),
            kwg.0.len()
        );
        Ok(Self { alphabet, kwg })
    }
}

struct Env<'a> {
    index: &'a PrefixIndex,
    adjacency: &'a matrix::Adjacency,
    cancel: Option<&'a CancelToken>,
    visited: matrix::CellSet,
    path: Vec<usize>,
    word: Vec<u8>,
    word_str: String,
    found: SolveResult,
    num_nodes: u32,
    cancelled: bool,
}

impl Env<'_> {
    #[inline(always)]
    fn poll_cancel(&mut self) -> bool {
        if let Some(cancel) = self.cancel {
            if cancel.is_cancelled() {
                self.cancelled = true;
            }
        }
        self.cancelled
    }

    fn record(&mut self) {
        self.word_str.clear();
        for &tile in self.word.iter() {
            self.word_str.push(self.index.alphabet.letter(tile));
        }
        if !self.found.contains_key(&self.word_str) {
            self.found.insert(self.word_str.clone(), self.path.clone());
        }
    }
}

fn visit(env: &mut Env<'_>, idx: usize, p: i32) {
    env.num_nodes = env.num_nodes.wrapping_add(1);
    if env.num_nodes & CANCEL_POLL_MASK == 0 && env.poll_cancel() {
        return;
    }
    let index = env.index;
    let cell = index.alphabet.cell(idx);
    let p = index.kwg.seek_all(p, cell);
    if p <= 0 {
        return;
    }
    let node = index.kwg[p];
    env.visited.insert(idx);
    env.path.push(idx);
    env.word.extend_from_slice(cell);
    if node.accepts() {
        env.record();
    }
    if node.arc_index() != 0 {
        let adjacency = env.adjacency;
        for &next in adjacency.of(idx) {
            if env.cancelled {
                break;
            }
            let next = next as usize;
            if !env.visited.contains(next) {
                visit(env, next, p);
            }
        }
    }
    env.word.truncate(env.word.len() - cell.len());
    env.path.pop();
    env.visited.remove(idx);
}

// Runs the search with an already built index. None if cancelled.
pub fn solve_indexed(
    board: &grid::Board,
    index: &PrefixIndex,
    cancel: Option<&CancelToken>,
) -> Option<SolveResult> {
    let t0 = std::time::Instant::now();
    let adjacency = matrix::Adjacency::new(board.dim());
    let mut env = Env {
        index,
        adjacency: &adjacency,
        cancel,
        visited: matrix::CellSet::new(board.len()),
        path: Vec::new(),
        word: Vec::new(),
        word_str: String::new(),
        found: SolveResult::new(),
        num_nodes: 0,
        cancelled: false,
    };
    for start in 0..board.len() {
        if env.poll_cancel() {
            break;
        }
        visit(&mut env, start, 0);
    }
    if env.cancelled {
        log::debug!("solve cancelled after {:?}", t0.elapsed());
        return None;
    }
    log::debug!(
        "solved {} words in {} nodes, {:?}",
        env.found.len(),
        env.num_nodes,
        t0.elapsed()
    );
    Some(env.found)
}

// Every candidate with at least one path, each with the first path found.
// Starting cells go in index order and neighbors in a fixed order.
pub fn solve_all(
    board: &grid::Board,
    candidates: &dictionary::Dictionary,
) -> error::Returns<SolveResult> {
    let index = PrefixIndex::new(board, candidates)?;
    Ok(solve_indexed(board, &index, None).unwrap_or_default())
}

// Same as solve_all, but None once cancel is observed.
pub fn solve_all_with_cancel(
    board: &grid::Board,
    candidates: &dictionary::Dictionary,
    cancel: &CancelToken,
) -> error::Returns<Option<SolveResult>> {
    if cancel.is_cancelled() {
        return Ok(None);
    }
    let index = PrefixIndex::new(board, candidates)?;
    Ok(solve_indexed(board, &index, Some(cancel)))
}

// Same words as solve_all, each with its highest-scoring path instead.
pub fn solve_all_best(
    board: &grid::Board,
    candidates: &dictionary::Dictionary,
    rules: &scoring::ScoringRules,
    variant: &scoring::RuleVariant,
) -> error::Returns<SolveResult> {
    let mut found = solve_all(board, candidates)?;
    let mut path_finder = path_finder::PathFinder::new(board, rules, variant);
    for (word, path) in found.iter_mut() {
        if let Some(best) = path_finder.find(word) {
            *path = best;
        }
    }
    Ok(found)
}
