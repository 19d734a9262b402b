// Copyright (C) 2020-2026 Andy Kurnia.

// Fast insecure non-cryptographic hash.
// Keys are dictionary words and tile labels, never attacker-chosen.

pub struct MyHasher(u64);

impl std::hash::Hasher for MyHasher {
    #[inline(always)]
    fn finish(&self) -> u64 {
        self.0
    }

    #[inline(always)]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (std::num::Wrapping(self.0) * std::num::Wrapping(3467)).0 ^ (!b as u64);
        }
    }

    // chars hash as one step instead of four bytes.
    #[inline(always)]
    fn write_u32(&mut self, i: u32) {
        self.0 = (std::num::Wrapping(self.0) * std::num::Wrapping(3467)).0 ^ (!i as u64);
    }
}

impl Default for MyHasher {
    #[inline(always)]
    fn default() -> MyHasher {
        MyHasher(0)
    }
}

pub type MyHasherDefault = std::hash::BuildHasherDefault<MyHasher>;
pub type MyHashMap<K, V> = std::collections::HashMap<K, V, MyHasherDefault>;
pub type MyHashSet<T> = std::collections::HashSet<T, MyHasherDefault>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_words_hash_apart() {
        let mut set = MyHashSet::<Box<str>>::default();
        for word in ["EE", "EEE", "QUI", "QI", "IQU"] {
            assert!(set.insert(word.into()));
        }
        assert!(!set.insert("QUI".into()));
        assert_eq!(set.len(), 5);
        let mut map = MyHashMap::<char, u8>::default();
        map.insert('É', 1);
        map.insert('E', 2);
        assert_eq!(map[&'É'], 1);
        assert_eq!(map[&'E'], 2);
    }
}
