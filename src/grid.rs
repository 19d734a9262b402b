// Copyright (C) 2020-2026 Andy Kurnia.

use super::{error, matrix, normalize};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum Bonus {
    LetterDouble,
    LetterTriple,
    WordDouble,
    WordTriple,
}

impl Bonus {
    #[inline(always)]
    pub fn letter_multiplier(self) -> i32 {
        match self {
            Bonus::LetterDouble => 2,
            Bonus::LetterTriple => 3,
            Bonus::WordDouble | Bonus::WordTriple => 1,
        }
    }

    #[inline(always)]
    pub fn word_multiplier(self) -> i32 {
        match self {
            Bonus::WordDouble => 2,
            Bonus::WordTriple => 3,
            Bonus::LetterDouble | Bonus::LetterTriple => 1,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Bonus::LetterDouble => "DL",
            Bonus::LetterTriple => "TL",
            Bonus::WordDouble => "DW",
            Bonus::WordTriple => "TW",
        }
    }

    pub fn from_code(code: &str) -> Option<Bonus> {
        match code.to_ascii_uppercase().as_str() {
            "DL" => Some(Bonus::LetterDouble),
            "TL" => Some(Bonus::LetterTriple),
            "DW" => Some(Bonus::WordDouble),
            "TW" => Some(Bonus::WordTriple),
            _ => None,
        }
    }
}

// letter is kept as given for display. the board matches on its normalized form.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Tile {
    pub letter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<Bonus>,
}

impl Tile {
    pub fn new(letter: &str, bonus: Option<Bonus>) -> Self {
        Self {
            letter: letter.to_string(),
            bonus,
        }
    }
}

// Ordered distinct cell indices, each adjacent to the previous one.
pub type Path = Vec<usize>;

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(try_from = "Vec<Tile>", into = "Vec<Tile>")]
pub struct Board {
    dim: matrix::Dim,
    tiles: Box<[Tile]>,
    labels: Box<[Box<str>]>,
}

impl Board {
    // side is derived from the tile count, which must be a perfect square.
    pub fn new(tiles: Vec<Tile>) -> error::Returns<Self> {
        let len = tiles.len();
        let side = len.isqrt();
        if side * side != len {
            return_error!(format!("board has {} tiles, not a square grid", len));
        }
        Self::with_side(side, tiles)
    }

    pub fn with_side(side: usize, tiles: Vec<Tile>) -> error::Returns<Self> {
        if side > u8::MAX as usize {
            return_error!(format!("board side {} is too large", side));
        }
        if tiles.len() != side * side {
            return_error!(format!(
                "board of side {} needs {} tiles, found {}",
                side,
                side * side,
                tiles.len()
            ));
        }
        let mut labels = Vec::with_capacity(tiles.len());
        for (idx, tile) in tiles.iter().enumerate() {
            let label = normalize::normalize(&tile.letter);
            if label.is_empty() {
                return_error!(format!(
                    "tile {} has no letters in label {:?}",
                    idx, tile.letter
                ));
            }
            labels.push(label.into_boxed_str());
        }
        Ok(Self {
            dim: matrix::Dim { side: side as u8 },
            tiles: tiles.into_boxed_slice(),
            labels: labels.into_boxed_slice(),
        })
    }

    // Whitespace-separated tiles in row-major order, each LABEL or LABEL:BONUS
    // where BONUS is one of DL TL DW TW. "/" may separate rows for readability.
    pub fn parse(s: &str) -> error::Returns<Self> {
        let mut tiles = Vec::new();
        for token in s.split(|c: char| c.is_whitespace() || c == '/') {
            if token.is_empty() {
                continue;
            }
            let (letter, bonus) = match token.split_once(':') {
                Some((letter, code)) => match Bonus::from_code(code) {
                    Some(bonus) => (letter, Some(bonus)),
                    None => {
                        return_error!(format!("invalid bonus {:?} in {:?}", code, token));
                    }
                },
                None => (token, None),
            };
            tiles.push(Tile::new(letter, bonus));
        }
        Self::new(tiles)
    }

    // A JSON array of tiles, or the token form accepted by parse.
    pub fn from_text(s: &str) -> error::Returns<Self> {
        if s.trim_start().starts_with('[') {
            Ok(serde_json::from_str::<Self>(s)?)
        } else {
            Self::parse(s)
        }
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.dim
    }

    #[inline(always)]
    pub fn side(&self) -> usize {
        self.dim.side as usize
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline(always)]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[inline(always)]
    pub fn tile(&self, idx: usize) -> &Tile {
        &self.tiles[idx]
    }

    // normalized label, e.g. "QU" for a tile shown as "Qu".
    #[inline(always)]
    pub fn label(&self, idx: usize) -> &str {
        &self.labels[idx]
    }

    #[inline(always)]
    pub fn bonus(&self, idx: usize) -> Option<Bonus> {
        self.tiles[idx].bonus
    }

    pub fn is_valid_path(&self, path: &[usize]) -> bool {
        let mut seen = matrix::CellSet::new(self.len());
        let mut prev = None;
        for &idx in path {
            if idx >= self.len() || seen.contains(idx) {
                return false;
            }
            if let Some(p) = prev {
                if !self.dim.is_adjacent(p, idx) {
                    return false;
                }
            }
            seen.insert(idx);
            prev = Some(idx);
        }
        true
    }

    // Whether the labels along path concatenate to exactly word.
    pub fn spells(&self, path: &[usize], word: &str) -> bool {
        let mut rest = word;
        for &idx in path {
            if idx >= self.len() {
                return false;
            }
            match rest.strip_prefix(self.label(idx)) {
                Some(r) => rest = r,
                None => return false,
            }
        }
        rest.is_empty()
    }

    // Concatenated labels along the path. Does not check adjacency.
    pub fn spell(&self, path: &[usize]) -> String {
        let mut ret = String::new();
        for &idx in path {
            ret.push_str(self.label(idx));
        }
        ret
    }
}

impl TryFrom<Vec<Tile>> for Board {
    type Error = error::BoxAnyError;

    fn try_from(tiles: Vec<Tile>) -> Result<Self, Self::Error> {
        Self::new(tiles)
    }
}

// The token form read by Board::parse, one row per "/" group.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (idx, tile) in self.tiles.iter().enumerate() {
            if idx > 0 {
                f.write_str(if idx % self.side() == 0 { " / " } else { " " })?;
            }
            f.write_str(&tile.letter)?;
            if let Some(bonus) = tile.bonus {
                write!(f, ":{}", bonus.code())?;
            }
        }
        Ok(())
    }
}

impl From<Board> for Vec<Tile> {
    fn from(board: Board) -> Self {
        board.tiles.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let board = Board::parse("Qu I:DL T E / S A:TW B c / D E F G / H i J K").unwrap();
        assert_eq!(board.side(), 4);
        assert_eq!(board.len(), 16);
        assert_eq!(board.tile(0).letter, "Qu");
        assert_eq!(board.label(0), "QU");
        assert_eq!(board.label(7), "C");
        assert_eq!(board.bonus(1), Some(Bonus::LetterDouble));
        assert_eq!(board.bonus(5), Some(Bonus::WordTriple));
        assert_eq!(board.bonus(0), None);
        assert_eq!(board.spell(&[0, 1, 2]), "QUIT");
    }

    #[test]
    fn test_display_reparses() {
        let text = "Qu I:DL T / S A:TW é:TL / D E:DW F";
        let board = Board::parse(text).unwrap();
        assert_eq!(board.to_string(), text);
        assert_eq!(Board::parse(&board.to_string()).unwrap().tiles(), board.tiles());
        assert_eq!(Board::parse("").unwrap().to_string(), "");
        assert_eq!(Board::parse("a:tl").unwrap().to_string(), "a:TL");
    }

    #[test]
    fn test_accented_label() {
        let board = Board::parse("é").unwrap();
        assert_eq!(board.tile(0).letter, "é");
        assert_eq!(board.label(0), "E");
    }

    #[test]
    fn test_malformed_boards() {
        assert!(Board::parse("A B C").is_err());
        assert!(Board::parse("A B C D:XX").is_err());
        assert!(Board::parse("A B C 1").is_err());
        assert!(Board::with_side(3, vec![Tile::new("A", None); 4]).is_err());
    }

    #[test]
    fn test_empty_board_is_allowed() {
        let board = Board::parse("").unwrap();
        assert!(board.is_empty());
        assert_eq!(board.side(), 0);
    }

    #[test]
    fn test_valid_path() {
        let board = Board::parse("A B C D E F G H I").unwrap();
        assert!(board.is_valid_path(&[]));
        assert!(board.is_valid_path(&[0, 4, 8, 7]));
        assert!(!board.is_valid_path(&[0, 2]));
        assert!(!board.is_valid_path(&[0, 1, 0]));
        assert!(!board.is_valid_path(&[2, 3]));
        assert!(!board.is_valid_path(&[9]));
    }

    #[test]
    fn test_spells() {
        let board = Board::parse("Qu I / T E").unwrap();
        assert!(board.spells(&[0, 1, 2], "QUIT"));
        assert!(board.spells(&[], ""));
        assert!(!board.spells(&[0, 1, 2], "QUITE"));
        assert!(!board.spells(&[0, 1], "QUITE"));
        assert!(!board.spells(&[0, 1], "Qui"));
        assert!(!board.spells(&[0, 4], "QUI"));
    }

    #[test]
    fn test_json() {
        let board = serde_json::from_str::<Board>(
            r#"[{"letter":"A","bonus":"WordDouble"},{"letter":"B"},{"letter":"Qu"},{"letter":"D"}]"#,
        )
        .unwrap();
        assert_eq!(board.side(), 2);
        assert_eq!(board.bonus(0), Some(Bonus::WordDouble));
        assert_eq!(board.label(2), "QU");
        let json = serde_json::to_string(&board).unwrap();
        assert!(json.contains(r#""bonus":"WordDouble""#));
        assert!(serde_json::from_str::<Board>(r#"[{"letter":"A"},{"letter":"B"}]"#).is_err());
        let board = Board::from_text(r#" [{"letter":"Qu","bonus":"LetterTriple"}]"#).unwrap();
        assert_eq!(board.bonus(0), Some(Bonus::LetterTriple));
        let board = Board::from_text("Qu:TL").unwrap();
        assert_eq!(board.label(0), "QU");
    }
}
