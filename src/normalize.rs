// Copyright (C) 2020-2026 Andy Kurnia.

// Matching form of any text: dictionary entries, tile labels, typed words.
// Output is uppercase letters only, accents removed, ligatures expanded.
// Display text keeps its accents elsewhere; this is only for comparing.

use super::{error, fash};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

pub struct Ligatures(fash::MyHashMap<char, Box<str>>);

static DEFAULT_LIGATURES: &[(char, &str)] = &[
    ('œ', "OE"),
    ('æ', "AE"),
    ('ß', "SS"),
    ('ẞ', "SS"),
    ('ĳ', "IJ"),
    ('ﬀ', "FF"),
    ('ﬁ', "FI"),
    ('ﬂ', "FL"),
    ('ﬃ', "FFI"),
    ('ﬄ', "FFL"),
    ('ﬅ', "ST"),
    ('ﬆ', "ST"),
];

// push c if it survives folding. returns false if nothing survives.
#[inline(always)]
fn push_folded(out: &mut String, c: char) -> bool {
    let mut pushed = false;
    for u in c.to_uppercase() {
        if u.is_alphabetic() && !is_combining_mark(u) {
            out.push(u);
            pushed = true;
        }
    }
    pushed
}

impl Ligatures {
    pub fn empty() -> Self {
        Self(fash::MyHashMap::default())
    }

    // Each key is also registered under its single-char uppercase form.
    // Expansions are stored folded (decomposed, unmarked, uppercase) and must
    // not contain keys themselves.
    pub fn new<'a, I: IntoIterator<Item = (char, &'a str)>>(pairs: I) -> error::Returns<Self> {
        let mut map = fash::MyHashMap::<char, Box<str>>::default();
        let mut expansions = Vec::new();
        for (key, expansion) in pairs {
            let mut folded = String::with_capacity(expansion.len());
            for c in expansion.nfd() {
                if is_combining_mark(c) {
                    continue;
                }
                if !push_folded(&mut folded, c) {
                    return_error!(format!(
                        "ligature {:?} expands to non-letter {:?}",
                        key, c
                    ));
                }
            }
            if folded.is_empty() {
                return_error!(format!("ligature {:?} has empty expansion", key));
            }
            // a second pass must leave the expansion alone.
            if !folded.nfd().eq(folded.chars()) {
                return_error!(format!(
                    "ligature {:?} expansion {:?} does not stay folded",
                    key, folded
                ));
            }
            let folded = Box::<str>::from(folded);
            let mut upper = key.to_uppercase();
            let keys = match (upper.next(), upper.next()) {
                (Some(u), None) if u != key => vec![key, u],
                _ => vec![key],
            };
            for k in keys {
                if let Some(previous) = map.insert(k, folded.clone()) {
                    if previous != folded {
                        return_error!(format!(
                            "ligature {:?} has conflicting expansions {:?} and {:?}",
                            k, previous, folded
                        ));
                    }
                }
            }
            expansions.push((key, folded));
        }
        for (key, folded) in expansions.iter() {
            if let Some(c) = folded.chars().find(|c| map.contains_key(c)) {
                return_error!(format!(
                    "ligature {:?} expands into another ligature {:?}",
                    key, c
                ));
            }
        }
        Ok(Self(map))
    }

    #[inline(always)]
    pub fn get(&self, c: char) -> Option<&str> {
        self.0.get(&c).map(|s| &s[..])
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Ligatures {
    fn default() -> Self {
        Self::new(DEFAULT_LIGATURES.iter().copied()).unwrap_or_else(|_| Self::empty())
    }
}

pub struct Normalizer {
    ligatures: Ligatures,
}

impl Normalizer {
    pub fn new(ligatures: Ligatures) -> Self {
        Self { ligatures }
    }

    // Appends the normalized form of raw to out.
    pub fn normalize_into(&self, raw: &str, out: &mut String) {
        for c in raw.trim().nfd() {
            if is_combining_mark(c) {
                continue;
            }
            if let Some(expansion) = self.ligatures.get(c) {
                out.push_str(expansion);
                continue;
            }
            for u in c.to_uppercase() {
                if let Some(expansion) = self.ligatures.get(u) {
                    out.push_str(expansion);
                } else if u.is_alphabetic() && !is_combining_mark(u) {
                    out.push(u);
                }
            }
        }
    }

    pub fn normalize(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        self.normalize_into(raw, &mut out);
        out
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Ligatures::default())
    }
}

static DEFAULT_NORMALIZER: std::sync::LazyLock<Normalizer> =
    std::sync::LazyLock::new(Normalizer::default);

// Normalizes with the default ligature table.
#[inline(always)]
pub fn normalize(raw: &str) -> String {
    DEFAULT_NORMALIZER.normalize(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accents_fold_to_base_letter() {
        assert_eq!(normalize("é"), "E");
        assert_eq!(normalize("è"), "E");
        assert_eq!(normalize("ê"), "E");
        assert_eq!(normalize("Ça"), "CA");
        assert_eq!(normalize("naïve"), "NAIVE");
        // already decomposed input
        assert_eq!(normalize("e\u{301}te\u{301}"), "ETE");
    }

    #[test]
    fn test_ligatures_and_case() {
        assert_eq!(normalize("cœur"), "COEUR");
        assert_eq!(normalize("CŒUR"), "COEUR");
        assert_eq!(normalize("Æther"), "AETHER");
        assert_eq!(normalize("straße"), "STRASSE");
        assert_eq!(normalize("ﬁne"), "FINE");
        assert_eq!(normalize("MiXeD"), "MIXED");
    }

    #[test]
    fn test_qu_is_plain_text_here() {
        assert_eq!(normalize("Qu"), "QU");
        assert_eq!(normalize("quiche"), "QUICHE");
    }

    #[test]
    fn test_trim_and_no_letters() {
        assert_eq!(normalize("  été \t\n"), "ETE");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("123 -- !?"), "");
        assert_eq!(normalize("aujourd'hui"), "AUJOURDHUI");
    }

    #[test]
    fn test_idempotent() {
        for s in [
            "",
            "  Éléphant ",
            "cœur",
            "ŒUVRE",
            "straße",
            "ﬃ",
            "quinze",
            "Ångström",
            "ǅemal",
            "ʼn",
            "ΐ",
            "x\u{345}y",
            "12abc",
            "İstanbul",
        ] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "input {:?}", s);
        }
    }

    #[test]
    fn test_custom_ligatures() {
        let normalizer = Normalizer::new(Ligatures::new([('ĳ', "Y")]).unwrap());
        assert_eq!(normalizer.normalize("ĳs"), "YS");
        assert_eq!(normalizer.normalize("Ĳs"), "YS");
        // not in this table, so œ stays as its own letter
        assert_eq!(normalizer.normalize("œ"), "Œ");
        let normalizer = Normalizer::new(Ligatures::empty());
        assert_eq!(normalizer.normalize("cœur"), "CŒUR");
    }

    #[test]
    fn test_bad_ligature_tables() {
        assert!(Ligatures::new([('œ', "")]).is_err());
        assert!(Ligatures::new([('œ', "o-e")]).is_err());
        assert!(Ligatures::new([('œ', "OE"), ('Œ', "EO")]).is_err());
        assert!(Ligatures::new([('x', "Y"), ('y', "Z")]).is_err());
        assert_eq!(Ligatures::new([('œ', "OE"), ('Œ', "oe")]).unwrap().len(), 2);
        // decomposing the expansion must not reveal another key.
        assert!(Ligatures::new([('œ', "É"), ('e', "A")]).is_err());
    }

    #[test]
    fn test_accented_expansion_is_folded() {
        let normalizer = Normalizer::new(Ligatures::new([('œ', "É")]).unwrap());
        let once = normalizer.normalize("cœur");
        assert_eq!(once, "CEUR");
        assert_eq!(normalizer.normalize(&once), once);
        let normalizer = Normalizer::new(Ligatures::new([('æ', "a\u{301}e")]).unwrap());
        let once = normalizer.normalize("Æther");
        assert_eq!(once, "AETHER");
        assert_eq!(normalizer.normalize(&once), once);
    }
}
