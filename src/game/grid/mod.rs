//! Game grid: the board type and its randomized, clustered generator.

pub mod grid;
pub mod generator;

pub use grid::*;
pub use generator::*;
