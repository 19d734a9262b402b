// Copyright (C) 2020-2026 Andy Kurnia.

use super::grid;
use std::fmt::Write;

// suffix shown after a tile's label.
#[inline(always)]
pub fn bonus_marker(bonus: Option<grid::Bonus>) -> char {
    match bonus {
        Some(grid::Bonus::WordTriple) => '=',
        Some(grid::Bonus::WordDouble) => '-',
        Some(grid::Bonus::LetterTriple) => '"',
        Some(grid::Bonus::LetterDouble) => '\'',
        None => ' ',
    }
}

// a..z, then aa, ab, ... like spreadsheet columns.
pub fn col_label(col: usize) -> String {
    let mut ret = Vec::new();
    let mut n = col + 1;
    while n > 0 {
        n -= 1;
        ret.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    ret.reverse();
    String::from_utf8(ret).unwrap_or_default()
}

fn write_border(s: &mut String, side: usize, width: usize) {
    s.push_str("  +");
    for _ in 0..side * (width + 1) {
        s.push('-');
    }
    s.push_str("+\n");
}

fn write_col_labels(s: &mut String, side: usize, width: usize) {
    s.push_str("   ");
    for c in 0..side {
        let _ = write!(s, "{:<w$}", col_label(c), w = width + 1);
    }
    s.push('\n');
}

// Labels with bonus markers. With a path, each cell on it shows its 1-based
// position instead of the marker.
pub fn format_board(board: &grid::Board, path: Option<&[usize]>) -> String {
    let side = board.side();
    let mut order = vec![0usize; board.len()];
    if let Some(path) = path {
        for (i, &idx) in (1..).zip(path.iter()) {
            if idx < order.len() {
                order[idx] = i;
            }
        }
    }
    let label_width = (0..board.len())
        .map(|idx| board.label(idx).chars().count())
        .max()
        .unwrap_or(1);
    let order_width = path.map_or(0, |path| path.len().to_string().len());
    let width = label_width + order_width.max(1);
    let mut s = String::new();
    write_col_labels(&mut s, side, width);
    write_border(&mut s, side, width);
    for r in 0..side {
        let _ = write!(s, "{:2}|", r + 1);
        for c in 0..side {
            let idx = r * side + c;
            let label = board.label(idx);
            if order[idx] != 0 {
                let _ = write!(
                    s,
                    "{}{:<w$}",
                    label,
                    order[idx],
                    w = width - label.chars().count()
                );
            } else {
                let _ = write!(
                    s,
                    "{}{:<w$}",
                    label,
                    bonus_marker(board.bonus(idx)),
                    w = width - label.chars().count()
                );
            }
            s.push(if c + 1 < side { ' ' } else { '|' });
        }
        if side == 0 {
            s.push('|');
        }
        let _ = writeln!(s, "{}", r + 1);
    }
    write_border(&mut s, side, width);
    write_col_labels(&mut s, side, width);
    s
}

pub fn print_board(board: &grid::Board) {
    print!("{}", format_board(board, None));
}

pub fn print_path(board: &grid::Board, path: &[usize]) {
    print!("{}", format_board(board, Some(path)));
}

// e.g. "a1 b2 c2" in the same coordinates as the board printout.
pub fn format_path(board: &grid::Board, path: &[usize]) -> String {
    let mut s = String::new();
    for (i, &idx) in path.iter().enumerate() {
        if i > 0 {
            s.push(' ');
        }
        let (row, col) = board.dim().row_col(idx);
        let _ = write!(s, "{}{}", col_label(col as usize), row as usize + 1);
    }
    s
}
