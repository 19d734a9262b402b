// Copyright (C) 2020-2026 Andy Kurnia.

// Compiles a round's candidate words into a minimized dawg. Identical
// suffix lists are shared, so words ending alike cost one set of nodes.
//
// node layout, one u32 each:
// bits 0-21 = index of the first child, 0 if none
// bit 22 = last sibling
// bit 23 = a word ends here
// bits 24-31 = machine letter
// node 0 points at the root sibling list.

use super::{error, fash};

pub const MAX_NODES: usize = 0x400000;

// An arc whose child list is still being collected.
struct OpenArc {
    tile: u8,
    accepts: bool,
    child: u32, // Refers to shared.
}

// A finished arc together with its right sibling, deduplicated.
#[derive(Clone, Eq, Hash, PartialEq)]
struct SharedArc {
    tile: u8,
    accepts: bool,
    child: u32,   // Refers to shared.
    sibling: u32, // Refers to shared.
}

struct Interner {
    shared: Vec<SharedArc>,
    lookup: fash::MyHashMap<SharedArc, u32>,
}

impl Interner {
    fn new() -> Self {
        // shared[0] is the empty list.
        let sink = SharedArc {
            tile: 0,
            accepts: false,
            child: 0,
            sibling: 0,
        };
        let mut lookup = fash::MyHashMap::default();
        lookup.insert(sink.clone(), 0);
        Self {
            shared: vec![sink],
            lookup,
        }
    }

    // Interns a sibling list back to front, returning its head.
    fn intern(&mut self, arcs: &[OpenArc]) -> u32 {
        let mut head = 0;
        for arc in arcs.iter().rev() {
            let key = SharedArc {
                tile: arc.tile,
                accepts: arc.accepts,
                child: arc.child,
                sibling: head,
            };
            head = match self.lookup.get(&key) {
                Some(&existing) => existing,
                None => {
                    let fresh = self.shared.len() as u32;
                    self.shared.push(key.clone());
                    self.lookup.insert(key, fresh);
                    fresh
                }
            };
        }
        head
    }
}

// The path of the previous word, one open sibling list per depth.
struct Frontier {
    arcs: Vec<OpenArc>,
    // arcs[starts[d]..] are the children of arcs[starts[d] - 1].
    starts: Vec<usize>,
}

impl Frontier {
    fn depth(&self) -> usize {
        self.starts.len()
    }

    fn descend(&mut self, tile: u8) {
        self.arcs.push(OpenArc {
            tile,
            accepts: false,
            child: 0,
        });
        self.starts.push(self.arcs.len());
    }

    fn close_deepest(&mut self, interner: &mut Interner) {
        if let Some(start) = self.starts.pop() {
            let child = interner.intern(&self.arcs[start..]);
            self.arcs[start - 1].child = child;
            self.arcs.truncate(start);
        }
    }
}

// Returns the shared index of the root list.
fn intern_words(interner: &mut Interner, sorted_machine_words: &[Box<[u8]>]) -> u32 {
    let mut frontier = Frontier {
        arcs: Vec::new(),
        starts: Vec::new(),
    };
    let mut prev_word: &[u8] = &[];
    for word in sorted_machine_words {
        let common = prev_word
            .iter()
            .zip(word.iter())
            .take_while(|(a, b)| a == b)
            .count();
        while frontier.depth() > common {
            frontier.close_deepest(interner);
        }
        for &tile in &word[common..] {
            frontier.descend(tile);
        }
        if let Some(last) = frontier.arcs.last_mut() {
            last.accepts = true;
        }
        prev_word = word;
    }
    while frontier.depth() > 0 {
        frontier.close_deepest(interner);
    }
    interner.intern(&frontier.arcs)
}

// Assigns final positions so every sibling list is contiguous, each list
// written once however many parents share it.
struct Layout<'a> {
    shared: &'a [SharedArc],
    // the list head that a shared arc belongs to, 0 for heads.
    head_of: Vec<u32>,
    position: Vec<u32>,
    num_placed: u32,
}

impl Layout<'_> {
    fn place(&mut self, mut p: u32) {
        while self.head_of[p as usize] != 0 {
            p = self.head_of[p as usize];
        }
        if self.position[p as usize] != 0 {
            return;
        }
        // mark in progress.
        self.position[p as usize] = !0;
        let mut len = 0u32;
        let mut q = p;
        loop {
            len += 1;
            let child = self.shared[q as usize].child;
            if child != 0 {
                self.place(child);
            }
            q = self.shared[q as usize].sibling;
            if q == 0 {
                break;
            }
        }
        let mut q = p;
        for i in 0..len {
            self.position[q as usize] = self.num_placed + i;
            q = self.shared[q as usize].sibling;
        }
        self.num_placed += len;
    }

    fn pack(&self, q: u32, is_last: bool) -> u32 {
        let arc = &self.shared[q as usize];
        (self.position[arc.child as usize] & 0x3fffff)
            | if is_last { 0x400000 } else { 0 }
            | if arc.accepts { 0x800000 } else { 0 }
            | (arc.tile as u32) << 24
    }

    fn emit(&self, root: u32) -> Vec<u32> {
        let mut nodes = vec![0u32; self.num_placed as usize];
        nodes[0] = (self.position[root as usize] & 0x3fffff) | 0x400000;
        for head in 1..self.shared.len() {
            if self.head_of[head] != 0 || self.position[head] == 0 {
                continue;
            }
            let mut q = head as u32;
            let mut at = self.position[head] as usize;
            loop {
                let sibling = self.shared[q as usize].sibling;
                nodes[at] = self.pack(q, sibling == 0);
                if sibling == 0 {
                    break;
                }
                q = sibling;
                at += 1;
            }
        }
        nodes
    }
}

// sorted_machine_words must be strictly increasing, with no empty word
// and no tile 0.
pub fn build(sorted_machine_words: &[Box<[u8]>]) -> error::Returns<Vec<u32>> {
    for (i, word) in sorted_machine_words.iter().enumerate() {
        if word.is_empty() {
            return_error!(format!("machine word {} is empty", i));
        }
        if word.contains(&0) {
            return_error!(format!("machine word {:?} uses reserved tile 0", word));
        }
        if i > 0 && sorted_machine_words[i - 1] >= *word {
            return_error!(format!(
                "machine words out of order: {:?} then {:?}",
                sorted_machine_words[i - 1],
                word
            ));
        }
    }

    let mut interner = Interner::new();
    let root = intern_words(&mut interner, sorted_machine_words);

    let shared = &interner.shared;
    let mut head_of = vec![0u32; shared.len()];
    for q in (1..shared.len()).rev() {
        head_of[shared[q].sibling as usize] = q as u32;
    }
    let mut layout = Layout {
        shared,
        head_of,
        position: vec![0u32; shared.len()],
        num_placed: 1,
    };
    // keeps the empty list from being placed.
    layout.position[0] = !0;
    layout.place(root);
    layout.position[0] = 0;

    if layout.num_placed as usize > MAX_NODES {
        return_error!(format!(
            "{} nodes do not fit in a 22-bit index",
            layout.num_placed
        ));
    }
    log::trace!(
        "dawg: {} words, {} shared arcs, {} nodes",
        sorted_machine_words.len(),
        shared.len(),
        layout.num_placed
    );
    Ok(layout.emit(root))
}
