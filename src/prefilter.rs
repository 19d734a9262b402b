// Copyright (C) 2020-2026 Andy Kurnia.

// Letter-count feasibility: a word survives only if the board holds at least
// as many of each character as the word needs. Adjacency is not checked here.
// A "QU" tile counts as one Q and one U.

use super::{alphabet, dictionary, error, grid};

pub struct Prefilter {
    alphabet: alphabet::BoardAlphabet,
    tally: Box<[u16]>,
    num_letters: usize,
    word_buffer: Vec<u8>,
}

impl Prefilter {
    pub fn new(board: &grid::Board) -> error::Returns<Self> {
        let alphabet = alphabet::BoardAlphabet::new(board)?;
        let tally = alphabet.board_tally();
        let num_letters = tally.iter().map(|&n| n as usize).sum();
        Ok(Self {
            alphabet,
            tally,
            num_letters,
            word_buffer: Vec::new(),
        })
    }

    // One pass over the word. The tally is borrowed from and then restored,
    // so the cost does not depend on board size.
    pub fn fits(&mut self, word: &str) -> bool {
        if word.is_empty() || word.len() > self.num_letters * 4 {
            return false;
        }
        if !self.alphabet.encode_into(word, &mut self.word_buffer) {
            return false;
        }
        if self.word_buffer.len() > self.num_letters {
            return false;
        }
        let mut taken = 0;
        let mut ok = true;
        for &tile in self.word_buffer.iter() {
            if self.tally[tile as usize] == 0 {
                ok = false;
                break;
            }
            self.tally[tile as usize] -= 1;
            taken += 1;
        }
        for &tile in self.word_buffer[..taken].iter() {
            self.tally[tile as usize] += 1;
        }
        ok
    }

    pub fn filter(&mut self, dictionary: &dictionary::Dictionary) -> dictionary::Dictionary {
        let t0 = std::time::Instant::now();
        let mut ret = dictionary::Dictionary::new();
        for word in dictionary.iter() {
            if self.fits(word) {
                ret.insert_normalized(word);
            }
        }
        log::debug!(
            "prefilter kept {} of {} words in {:?}",
            ret.len(),
            dictionary.len(),
            t0.elapsed()
        );
        ret
    }
}

pub fn filter_dictionary(
    dictionary: &dictionary::Dictionary,
    board: &grid::Board,
) -> error::Returns<dictionary::Dictionary> {
    Ok(Prefilter::new(board)?.filter(dictionary))
}
