// Copyright (C) 2020-2026 Andy Kurnia.

use super::{error, fash, normalize};

// Set of normalized words. Built once from a raw word list and then only read.
// Passed explicitly to every call so tests can use tiny synthetic ones.
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    words: fash::MyHashSet<Box<str>>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    // Normalizes each entry. Entries without letters are skipped.
    pub fn from_words<S: AsRef<str>, I: IntoIterator<Item = S>>(
        normalizer: &normalize::Normalizer,
        raw_words: I,
    ) -> Self {
        let mut ret = Self::new();
        let mut buf = String::new();
        for raw_word in raw_words {
            buf.clear();
            normalizer.normalize_into(raw_word.as_ref(), &mut buf);
            if !buf.is_empty() && !ret.words.contains(&buf[..]) {
                ret.words.insert(buf[..].into());
            }
        }
        ret
    }

    // One entry per line.
    pub fn from_text(normalizer: &normalize::Normalizer, giant_string: &str) -> Self {
        Self::from_words(normalizer, giant_string.lines())
    }

    pub fn load<P: AsRef<std::path::Path>>(
        normalizer: &normalize::Normalizer,
        path: P,
    ) -> error::Returns<Self> {
        let giant_string = std::fs::read_to_string(path.as_ref())?;
        let ret = Self::from_text(normalizer, &giant_string);
        log::debug!(
            "loaded {} words from {}",
            ret.len(),
            path.as_ref().display()
        );
        Ok(ret)
    }

    // word must already be normalized.
    #[inline(always)]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    // Inserts an already-normalized word. Returns false if it was present.
    pub fn insert_normalized(&mut self, word: &str) -> bool {
        !word.is_empty() && !self.words.contains(word) && self.words.insert(word.into())
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| &w[..])
    }

    pub fn sorted(&self) -> Vec<&str> {
        let mut ret = self.iter().collect::<Vec<_>>();
        ret.sort_unstable();
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_words_normalizes_and_dedups() {
        let normalizer = normalize::Normalizer::default();
        let dict = Dictionary::from_words(&normalizer, ["été", "ETE", " Ete ", "cœur", "", "--", "qui"]);
        assert_eq!(dict.len(), 3);
        assert!(dict.contains("ETE"));
        assert!(dict.contains("COEUR"));
        assert!(dict.contains("QUI"));
        assert!(!dict.contains("été"));
        assert_eq!(dict.sorted(), ["COEUR", "ETE", "QUI"]);
    }

    #[test]
    fn test_from_text_and_insert() {
        let normalizer = normalize::Normalizer::default();
        let mut dict = Dictionary::from_text(&normalizer, "ee\neee\n\n  \n");
        assert_eq!(dict.len(), 2);
        assert!(dict.insert_normalized("EEEE"));
        assert!(!dict.insert_normalized("EEEE"));
        assert!(!dict.insert_normalized(""));
        assert_eq!(dict.len(), 3);
        assert!(Dictionary::new().is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let normalizer = normalize::Normalizer::default();
        assert!(Dictionary::load(&normalizer, "/nonexistent/words.txt").is_err());
    }
}
