// Copyright (C) 2020-2026 Andy Kurnia.

#[macro_use]
pub mod error;

pub mod alphabet;
pub mod build;
pub mod dictionary;
pub mod display;
pub mod fash;
pub mod grid;
pub mod kwg;
pub mod matrix;
pub mod normalize;
pub mod path_finder;
pub mod prefilter;
pub mod round;
pub mod scoring;
pub mod solver;
pub mod stats;
