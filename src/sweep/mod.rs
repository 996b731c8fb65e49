//! Independent-variable sweeps (concentration and time grids).

pub mod grid;

pub use grid::*;
