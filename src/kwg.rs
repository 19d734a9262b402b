// Copyright (C) 2020-2026 Andy Kurnia.

use super::{build, error};

#[derive(Clone, Copy)]
pub struct Node(u32);

impl Node {
    #[inline(always)]
    pub fn tile(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline(always)]
    pub fn accepts(&self) -> bool {
        self.0 & 0x800000 != 0
    }

    #[inline(always)]
    pub fn is_end(&self) -> bool {
        self.0 & 0x400000 != 0
    }

    #[inline(always)]
    pub fn arc_index(&self) -> i32 {
        (self.0 & 0x3fffff) as i32
    }
}

pub struct Kwg(pub Box<[Node]>);

impl std::ops::Index<i32> for Kwg {
    type Output = Node;

    #[inline(always)]
    fn index(&self, i: i32) -> &Node {
        &self.0[i as usize]
    }
}

impl Kwg {
    pub fn from_nodes(nodes: Vec<u32>) -> Kwg {
        Kwg(nodes.into_iter().map(Node).collect())
    }

    // machine words must be sorted, unique, non-empty and free of tile 0.
    pub fn from_machine_words(sorted_machine_words: &[Box<[u8]>]) -> error::Returns<Kwg> {
        Ok(Self::from_nodes(build::build(sorted_machine_words)?))
    }

    // p = 0 is the root. returns the node reached by tile, or -1.
    #[inline(always)]
    pub fn seek(&self, mut p: i32, tile: u8) -> i32 {
        if p >= 0 {
            p = self[p].arc_index();
            if p > 0 {
                loop {
                    let node = self[p];
                    if node.tile() == tile {
                        return p;
                    }
                    if node.is_end() {
                        return -1;
                    }
                    p += 1;
                }
            }
        }
        -1
    }

    // follows several tiles at once, -1 as soon as one is missing.
    #[inline(always)]
    pub fn seek_all(&self, mut p: i32, tiles: &[u8]) -> i32 {
        for &tile in tiles {
            p = self.seek(p, tile);
            if p <= 0 {
                return -1;
            }
        }
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kwg_of(v: &[&[u8]]) -> Kwg {
        let words = v.iter().map(|&w| w.into()).collect::<Vec<Box<[u8]>>>();
        Kwg::from_machine_words(&words).unwrap()
    }

    #[test]
    fn test_empty() {
        let kwg = Kwg::from_nodes(vec![0x400000]);
        assert_eq!(kwg.seek(0, 1), -1);
        assert_eq!(kwg_of(&[]).seek(0, 1), -1);
        assert_eq!(kwg_of(&[]).0.len(), 1);
    }

    #[test]
    fn test_prefixes_and_words() {
        // EE, EEE, QUI with E=1 I=2 Q=3 U=4
        let kwg = kwg_of(&[&[1, 1], &[1, 1, 1], &[3, 4, 2]]);
        let p = kwg.seek(0, 1);
        assert!(p > 0);
        assert!(!kwg[p].accepts());
        let p = kwg.seek(p, 1);
        assert!(p > 0 && kwg[p].accepts());
        let p = kwg.seek(p, 1);
        assert!(p > 0 && kwg[p].accepts());
        assert_eq!(kwg.seek(p, 1), -1);
        assert!(kwg.seek_all(0, &[3, 4]) > 0);
        assert_eq!(kwg.seek_all(0, &[3, 2]), -1);
        let p = kwg.seek_all(0, &[3, 4, 2]);
        assert!(p > 0 && kwg[p].accepts());
        let p = kwg.seek_all(0, &[3, 4]);
        assert!(p > 0 && !kwg[p].accepts());
        assert_eq!(kwg.seek(0, 2), -1);
    }
}
