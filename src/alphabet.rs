// Copyright (C) 2020-2026 Andy Kurnia.

use super::{error, fash, grid, normalize};

// Base points per tile label. "QU" is its own entry, not Q plus U.
// The values are supplied by the caller; nothing here is built in.
#[derive(Clone, Debug, Default)]
pub struct PointTable {
    scores: fash::MyHashMap<Box<str>, i32>,
}

#[derive(serde::Deserialize)]
struct PointRecord {
    label: String,
    points: i32,
}

impl PointTable {
    pub fn new<S: AsRef<str>, I: IntoIterator<Item = (S, i32)>>(pairs: I) -> error::Returns<Self> {
        let mut scores = fash::MyHashMap::default();
        for (raw_label, points) in pairs {
            let raw_label = raw_label.as_ref();
            let label = normalize::normalize(raw_label);
            if label.is_empty() {
                return_error!(format!("point table label {:?} has no letters", raw_label));
            }
            if points < 0 {
                return_error!(format!("point table label {:?} has negative points", raw_label));
            }
            if scores.insert(label.into_boxed_str(), points).is_some() {
                return_error!(format!("point table label {:?} is repeated", raw_label));
            }
        }
        Ok(Self { scores })
    }

    // label,points per line, no header.
    pub fn from_csv<R: std::io::Read>(reader: R) -> error::Returns<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut pairs = Vec::new();
        for result in csv_reader.deserialize::<PointRecord>() {
            let record = result?;
            pairs.push((record.label, record.points));
        }
        Self::new(pairs)
    }

    // {"A": 1, "QU": 10, ...}
    pub fn from_json(s: &str) -> error::Returns<Self> {
        let raw = serde_json::from_str::<std::collections::BTreeMap<String, i32>>(s)?;
        Self::new(raw)
    }

    #[inline(always)]
    pub fn get(&self, label: &str) -> Option<i32> {
        self.scores.get(label).copied()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    // labels on the board that the table does not price.
    pub fn missing_labels<'a>(&self, board: &'a grid::Board) -> Vec<&'a str> {
        let mut ret = (0..board.len())
            .map(|idx| board.label(idx))
            .filter(|label| !self.scores.contains_key(*label))
            .collect::<Vec<_>>();
        ret.sort_unstable();
        ret.dedup();
        ret
    }
}

// Bonus by spelled word length. Index is the length.
#[derive(Clone, Debug, Default, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct LengthBonus(Vec<i32>);

#[derive(serde::Deserialize)]
struct LengthRecord {
    length: usize,
    bonus: i32,
}

impl LengthBonus {
    // Lengths not listed below the longest one get 0.
    pub fn new<I: IntoIterator<Item = (usize, i32)>>(pairs: I) -> error::Returns<Self> {
        let mut bonuses = Vec::new();
        let mut seen = Vec::new();
        for (length, bonus) in pairs {
            if length > 64 {
                return_error!(format!("length bonus for {} letters is too long", length));
            }
            if bonuses.len() <= length {
                bonuses.resize(length + 1, 0);
                seen.resize(length + 1, false);
            }
            if seen[length] {
                return_error!(format!("length bonus for {} letters is repeated", length));
            }
            seen[length] = true;
            bonuses[length] = bonus;
        }
        Ok(Self(bonuses))
    }

    pub fn none() -> Self {
        Self(Vec::new())
    }

    // length,bonus per line, no header.
    pub fn from_csv<R: std::io::Read>(reader: R) -> error::Returns<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut pairs = Vec::new();
        for result in csv_reader.deserialize::<LengthRecord>() {
            let record = result?;
            pairs.push((record.length, record.bonus));
        }
        Self::new(pairs)
    }

    // Lengths past the end of the table reuse the last entry.
    #[inline(always)]
    pub fn get(&self, length: usize) -> i32 {
        match self.0.get(length) {
            Some(&bonus) => bonus,
            None => self.0.last().copied().unwrap_or(0),
        }
    }
}

// Per-board machine letters: every distinct character on the board gets a
// tile number from 1, in board order. 0 stays reserved for the prefix index.
#[derive(Clone, Debug)]
pub struct BoardAlphabet {
    ascii: [u8; 128],
    others: fash::MyHashMap<char, u8>,
    letters: Vec<char>,
    // machine letters of each cell's label, concatenated.
    cell_letters: Box<[u8]>,
    cell_offsets: Box<[u32]>,
}

impl BoardAlphabet {
    pub fn new(board: &grid::Board) -> error::Returns<Self> {
        let mut ret = Self {
            ascii: [0u8; 128],
            others: fash::MyHashMap::default(),
            letters: vec!['\0'],
            cell_letters: Box::new([]),
            cell_offsets: Box::new([]),
        };
        let mut cell_letters = Vec::with_capacity(board.len() + 1);
        let mut cell_offsets = Vec::with_capacity(board.len() + 1);
        cell_offsets.push(0u32);
        for idx in 0..board.len() {
            for c in board.label(idx).chars() {
                let tile = match ret.tile(c) {
                    Some(tile) => tile,
                    None => {
                        if ret.letters.len() > u8::MAX as usize {
                            return_error!(format!(
                                "board has more than {} distinct letters",
                                u8::MAX
                            ));
                        }
                        let tile = ret.letters.len() as u8;
                        ret.letters.push(c);
                        if (c as u32) < 128 {
                            ret.ascii[c as usize] = tile;
                        } else {
                            ret.others.insert(c, tile);
                        }
                        tile
                    }
                };
                cell_letters.push(tile);
            }
            cell_offsets.push(cell_letters.len() as u32);
        }
        ret.cell_letters = cell_letters.into_boxed_slice();
        ret.cell_offsets = cell_offsets.into_boxed_slice();
        Ok(ret)
    }

    // number of machine letters including the reserved 0.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.letters.len() <= 1
    }

    #[inline(always)]
    pub fn tile(&self, c: char) -> Option<u8> {
        let tile = if (c as u32) < 128 {
            self.ascii[c as usize]
        } else {
            self.others.get(&c).copied().unwrap_or(0)
        };
        if tile == 0 { None } else { Some(tile) }
    }

    #[inline(always)]
    pub fn letter(&self, tile: u8) -> char {
        self.letters[tile as usize]
    }

    #[inline(always)]
    pub fn cell(&self, idx: usize) -> &[u8] {
        &self.cell_letters[self.cell_offsets[idx] as usize..self.cell_offsets[idx + 1] as usize]
    }

    // false if the word uses a character absent from the board.
    pub fn encode_into(&self, word: &str, out: &mut Vec<u8>) -> bool {
        out.clear();
        for c in word.chars() {
            match self.tile(c) {
                Some(tile) => out.push(tile),
                None => return false,
            }
        }
        true
    }

    // how many of each machine letter the board holds.
    pub fn board_tally(&self) -> Box<[u16]> {
        let mut tally = vec![0u16; self.len()];
        for &tile in self.cell_letters.iter() {
            tally[tile as usize] += 1;
        }
        tally.into_boxed_slice()
    }
}
