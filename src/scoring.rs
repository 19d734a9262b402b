// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, error, grid, normalize};

// Only scoring looks at the variant. Search and enumeration never do.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "kind")]
pub enum RuleVariant {
    #[default]
    Default,
    // Board bonuses are ignored. Tiles labeled `letter` score `score` each.
    BonusLetter { letter: String, score: i32 },
    // Every word is worth `score`, whatever its path.
    FixedWord { score: i32 },
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Serialize)]
pub struct BonusSummary {
    pub letter_double: u32,
    pub letter_triple: u32,
    pub word_double: u32,
    pub word_triple: u32,
}

pub fn summarize_bonuses(path: &[usize], board: &grid::Board) -> BonusSummary {
    let mut ret = BonusSummary::default();
    for &idx in path {
        match board.bonus(idx) {
            Some(grid::Bonus::LetterDouble) => ret.letter_double += 1,
            Some(grid::Bonus::LetterTriple) => ret.letter_triple += 1,
            Some(grid::Bonus::WordDouble) => ret.word_double += 1,
            Some(grid::Bonus::WordTriple) => ret.word_triple += 1,
            None => {}
        }
    }
    ret
}

// The injected constants.
#[derive(Clone, Debug, Default)]
pub struct ScoringRules {
    points: alphabet::PointTable,
    length_bonus: alphabet::LengthBonus,
}

impl ScoringRules {
    pub fn new(points: alphabet::PointTable, length_bonus: alphabet::LengthBonus) -> Self {
        Self {
            points,
            length_bonus,
        }
    }

    // Both files are headerless CSV: label,points and length,bonus.
    pub fn load<P: AsRef<std::path::Path>, Q: AsRef<std::path::Path>>(
        points_path: P,
        length_bonus_path: Q,
    ) -> error::Returns<Self> {
        let points = alphabet::PointTable::from_csv(std::fs::File::open(points_path.as_ref())?)?;
        let length_bonus =
            alphabet::LengthBonus::from_csv(std::fs::File::open(length_bonus_path.as_ref())?)?;
        log::debug!(
            "loaded {} tile scores from {}",
            points.len(),
            points_path.as_ref().display()
        );
        Ok(Self::new(points, length_bonus))
    }

    #[inline(always)]
    pub fn points(&self) -> &alphabet::PointTable {
        &self.points
    }

    #[inline(always)]
    pub fn length_bonus(&self) -> &alphabet::LengthBonus {
        &self.length_bonus
    }

    // Base points of an already-normalized label. Unpriced labels score 0.
    #[inline(always)]
    pub fn label_score(&self, label: &str) -> i32 {
        self.points.get(label).unwrap_or(0)
    }

    // Face value of the tile, bonus marking ignored.
    pub fn tile_score(&self, tile: &grid::Tile) -> i32 {
        self.label_score(&normalize::normalize(&tile.letter))
    }

    // Returns labels the point table does not cover, logging each once.
    pub fn validate_board<'a>(&self, board: &'a grid::Board) -> Vec<&'a str> {
        let missing = self.points.missing_labels(board);
        for label in missing.iter() {
            log::warn!("no points for tile {:?}, it will score 0", label);
        }
        missing
    }

    pub fn scorer<'a>(&'a self, variant: &RuleVariant) -> Scorer<'a> {
        Scorer::new(self, variant)
    }

    // word is the normalized word that path spells on board. A word that
    // does not match the path scores 0, whatever the build.
    pub fn compute_score(
        &self,
        word: &str,
        path: &[usize],
        board: &grid::Board,
        variant: &RuleVariant,
    ) -> i32 {
        if !board.spells(path, word) {
            return 0;
        }
        self.scorer(variant).score(path, board)
    }
}

enum Mode {
    Default,
    BonusLetter { label: Box<str>, score: i32 },
    FixedWord { score: i32 },
}

// Rules with the variant resolved, for pricing many paths in a row.
pub struct Scorer<'a> {
    rules: &'a ScoringRules,
    mode: Mode,
}

impl<'a> Scorer<'a> {
    pub fn new(rules: &'a ScoringRules, variant: &RuleVariant) -> Self {
        let mode = match variant {
            RuleVariant::Default => Mode::Default,
            RuleVariant::BonusLetter { letter, score } => Mode::BonusLetter {
                label: normalize::normalize(letter).into_boxed_str(),
                score: *score,
            },
            RuleVariant::FixedWord { score } => Mode::FixedWord { score: *score },
        };
        Self { rules, mode }
    }

    // Points come only from the cells on the path.
    pub fn score(&self, path: &[usize], board: &grid::Board) -> i32 {
        if path.is_empty() {
            return 0;
        }
        match &self.mode {
            Mode::Default => {
                let mut word_multiplier = 1i32;
                let mut word_score = 0i32;
                let mut num_chars = 0;
                for &idx in path {
                    let label = board.label(idx);
                    num_chars += label.chars().count();
                    let (tile_multiplier, this_word_multiplier) = match board.bonus(idx) {
                        Some(bonus) => (bonus.letter_multiplier(), bonus.word_multiplier()),
                        None => (1, 1),
                    };
                    word_multiplier = word_multiplier.saturating_mul(this_word_multiplier);
                    word_score = word_score
                        .saturating_add(self.rules.label_score(label).saturating_mul(tile_multiplier));
                }
                word_score
                    .saturating_mul(word_multiplier)
                    .saturating_add(self.rules.length_bonus.get(num_chars))
            }
            Mode::BonusLetter { label, score } => {
                let mut word_score = 0i32;
                for &idx in path {
                    let this_label = board.label(idx);
                    word_score = word_score.saturating_add(if this_label == &label[..] {
                        *score
                    } else {
                        self.rules.label_score(this_label)
                    });
                }
                word_score
            }
            Mode::FixedWord { score } => *score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ScoringRules {
        ScoringRules::new(
            alphabet::PointTable::new([
                ("A", 1),
                ("B", 4),
                ("C", 4),
                ("E", 1),
                ("I", 1),
                ("T", 1),
                ("QU", 10),
            ])
            .unwrap(),
            alphabet::LengthBonus::new([(5, 5), (6, 10)]).unwrap(),
        )
    }

    #[test]
    fn test_summarize_bonuses() {
        let board = grid::Board::parse("A:DL B:TL C:DW E:TW / A:DW B C E / A B C E / A B C E")
            .unwrap();
        assert_eq!(
            summarize_bonuses(&[0, 1, 2, 3, 4], &board),
            BonusSummary {
                letter_double: 1,
                letter_triple: 1,
                word_double: 2,
                word_triple: 1,
            }
        );
        assert_eq!(summarize_bonuses(&[], &board), BonusSummary::default());
    }

    #[test]
    fn test_default_formula() {
        let rules = rules();
        let board = grid::Board::parse("A:DL B C:DW E:TW").unwrap();
        let v = RuleVariant::Default;
        assert_eq!(rules.compute_score("AB", &[0, 1], &board, &v), 2 + 4);
        // (2 + 4 + 4) * 2
        assert_eq!(rules.compute_score("ABC", &[0, 1, 2], &board, &v), 20);
        // (2 + 4 + 4 + 1) * 2 * 3
        assert_eq!(rules.compute_score("ABCE", &[0, 1, 2, 3], &board, &v), 66);
        assert_eq!(rules.compute_score("", &[], &board, &v), 0);
    }

    #[test]
    fn test_length_bonus_counts_characters() {
        let rules = rules();
        let board = grid::Board::parse("Qu I T E").unwrap();
        // QUITE is 5 characters on 4 cells.
        assert_eq!(
            rules.compute_score("QUITE", &[0, 1, 2, 3], &board, &RuleVariant::Default),
            10 + 1 + 1 + 1 + 5
        );
        assert_eq!(
            rules.compute_score("QUIT", &[0, 1, 2], &board, &RuleVariant::Default),
            12
        );
    }

    #[test]
    fn test_bonus_letter_ignores_multipliers() {
        let rules = rules();
        let board = grid::Board::parse("A:DW A:DW B:TL C").unwrap();
        let v = RuleVariant::BonusLetter {
            letter: "a".into(),
            score: 20,
        };
        assert_eq!(rules.compute_score("AAB", &[0, 1, 2], &board, &v), 20 + 20 + 4);
        assert_eq!(rules.compute_score("AABC", &[0, 1, 2, 3], &board, &v), 48);
    }

    #[test]
    fn test_fixed_word() {
        let rules = rules();
        let board = grid::Board::parse("A:TW B C E").unwrap();
        let v = RuleVariant::FixedWord { score: 7 };
        assert_eq!(rules.compute_score("AB", &[0, 1], &board, &v), 7);
        assert_eq!(rules.compute_score("ABCE", &[0, 1, 2, 3], &board, &v), 7);
        assert_eq!(rules.compute_score("", &[], &board, &v), 0);
    }

    #[test]
    fn test_word_must_match_path() {
        let rules = rules();
        let board = grid::Board::parse("Qu I / T E").unwrap();
        let v = RuleVariant::Default;
        assert_eq!(rules.compute_score("QUI", &[0, 1], &board, &v), 11);
        // not normalized, so not what the path spells.
        assert_eq!(rules.compute_score("qui", &[0, 1], &board, &v), 0);
        assert_eq!(rules.compute_score("QUIT", &[0, 1], &board, &v), 0);
        assert_eq!(rules.compute_score("QU", &[0, 1], &board, &v), 0);
        assert_eq!(rules.compute_score("TIE", &[0, 1], &board, &v), 0);
        assert_eq!(
            rules.compute_score("QUIT", &[0, 1], &board, &RuleVariant::FixedWord { score: 7 }),
            0
        );
        assert_eq!(rules.scorer(&v).score(&[0, 1], &board), 11);
    }

    #[test]
    fn test_more_bonuses_never_score_lower() {
        let rules = rules();
        let plain = grid::Board::parse("A B C E").unwrap();
        let bonused = grid::Board::parse("A:DL B:TL C:DW E:TW").unwrap();
        for path in [&[0usize, 1][..], &[0, 1, 2], &[3, 2, 1, 0], &[2, 0]] {
            let word = plain.spell(path);
            assert!(
                rules.compute_score(&word, path, &bonused, &RuleVariant::Default)
                    >= rules.compute_score(&word, path, &plain, &RuleVariant::Default)
            );
        }
    }

    #[test]
    fn test_only_path_cells_score() {
        let rules = rules();
        let board = grid::Board::parse("A:TW B:TW C:TW QU:TW").unwrap();
        assert_eq!(
            rules.compute_score("A", &[0], &board, &RuleVariant::Default),
            3
        );
    }

    #[test]
    fn test_tile_score() {
        let rules = rules();
        assert_eq!(rules.tile_score(&grid::Tile::new("Qu", Some(grid::Bonus::LetterTriple))), 10);
        assert_eq!(rules.tile_score(&grid::Tile::new("b", None)), 4);
        assert_eq!(rules.tile_score(&grid::Tile::new("Z", None)), 0);
        let board = grid::Board::parse("A Z Q Z").unwrap();
        assert_eq!(rules.validate_board(&board), ["Q", "Z"]);
    }

    #[test]
    fn test_load_sample_tables() {
        let rules = ScoringRules::load("data/points.csv", "data/length_bonus.csv").unwrap();
        assert_eq!(rules.label_score("QU"), 10);
        assert_eq!(rules.label_score("E"), 1);
        assert_eq!(rules.points().len(), 27);
        assert_eq!(rules.length_bonus().get(4), 0);
        assert_eq!(rules.length_bonus().get(6), 10);
        assert!(ScoringRules::load("data/missing.csv", "data/length_bonus.csv").is_err());
    }

    #[test]
    fn test_variant_json() {
        let v = serde_json::from_str::<RuleVariant>(r#"{"kind":"BonusLetter","letter":"A","score":20}"#)
            .unwrap();
        assert_eq!(
            v,
            RuleVariant::BonusLetter {
                letter: "A".into(),
                score: 20
            }
        );
        assert_eq!(
            serde_json::from_str::<RuleVariant>(r#"{"kind":"Default"}"#).unwrap(),
            RuleVariant::Default
        );
    }
}
