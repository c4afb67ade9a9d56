pub mod types;
pub mod grid;
pub mod timer;
pub mod score;
pub mod state;
