// Copyright (C) 2020-2026 Andy Kurnia.

use super::error;

// square grid, row-major.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Dim {
    pub side: u8,
}

static DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl Dim {
    #[inline(always)]
    pub fn num_cells(&self) -> usize {
        (self.side as usize) * (self.side as usize)
    }

    #[inline(always)]
    pub fn at_row_col(&self, row: u8, col: u8) -> usize {
        (row as usize) * (self.side as usize) + (col as usize)
    }

    #[inline(always)]
    pub fn row_col(&self, idx: usize) -> (u8, u8) {
        (
            (idx / self.side as usize) as u8,
            (idx % self.side as usize) as u8,
        )
    }

    // Calls f with every cell touching idx by edge or corner, in a fixed order.
    // Caller guarantees idx < num_cells().
    #[inline(always)]
    pub fn for_each_neighbor<F: FnMut(usize)>(&self, idx: usize, mut f: F) {
        let side = self.side as i16;
        let (row, col) = self.row_col(idx);
        for &(dr, dc) in DIRECTIONS.iter() {
            let r = row as i16 + dr as i16;
            let c = col as i16 + dc as i16;
            if r >= 0 && r < side && c >= 0 && c < side {
                f(self.at_row_col(r as u8, c as u8));
            }
        }
    }

    #[inline(always)]
    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        let (ra, ca) = self.row_col(a);
        let (rb, cb) = self.row_col(b);
        a != b && ra.abs_diff(rb) <= 1 && ca.abs_diff(cb) <= 1
    }
}

pub fn neighbors(index: usize, side: usize) -> error::Returns<Vec<usize>> {
    if side > u8::MAX as usize {
        return_error!(format!("grid side {} is too large", side));
    }
    let dim = Dim { side: side as u8 };
    if index >= dim.num_cells() {
        return_error!(format!(
            "cell {} is outside a {}x{} grid",
            index, side, side
        ));
    }
    let mut ret = Vec::with_capacity(8);
    dim.for_each_neighbor(index, |j| ret.push(j));
    Ok(ret)
}

// Neighbor lists for every cell, computed once per board.
// cells[offsets[i]..offsets[i + 1]] are the neighbors of i.
#[derive(Clone, Debug)]
pub struct Adjacency {
    offsets: Box<[u32]>,
    cells: Box<[u16]>,
}

impl Adjacency {
    pub fn new(dim: Dim) -> Self {
        let num_cells = dim.num_cells();
        let mut offsets = Vec::with_capacity(num_cells + 1);
        let mut cells = Vec::with_capacity(num_cells * 8);
        offsets.push(0);
        for idx in 0..num_cells {
            dim.for_each_neighbor(idx, |j| cells.push(j as u16));
            offsets.push(cells.len() as u32);
        }
        Self {
            offsets: offsets.into_boxed_slice(),
            cells: cells.into_boxed_slice(),
        }
    }

    #[inline(always)]
    pub fn of(&self, idx: usize) -> &[u16] {
        &self.cells[self.offsets[idx] as usize..self.offsets[idx + 1] as usize]
    }
}

// One bit per cell. Paths mark and unmark cells through this while searching.
#[derive(Clone, Debug)]
pub struct CellSet(Box<[u64]>);

impl CellSet {
    pub fn new(num_cells: usize) -> Self {
        Self(vec![0u64; num_cells.div_ceil(64)].into_boxed_slice())
    }

    #[inline(always)]
    pub fn contains(&self, idx: usize) -> bool {
        self.0[idx >> 6] & (1 << (idx & 63)) != 0
    }

    #[inline(always)]
    pub fn insert(&mut self, idx: usize) {
        self.0[idx >> 6] |= 1 << (idx & 63);
    }

    #[inline(always)]
    pub fn remove(&mut self, idx: usize) {
        self.0[idx >> 6] &= !(1 << (idx & 63));
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }
}
