use serde::{Serialize, Deserialize};

use crate::config::game::{ORANGE_REWARD, APPLE_REWARD, LEMON_REWARD, BALL_REWARD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Symbols a cell can hold. `Ball` is the zero-reward decoy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    Orange,
    Apple,
    Lemon,
    Ball,
}

impl Symbol {
    pub const ALL: [Symbol; 4] = [Symbol::Orange, Symbol::Apple, Symbol::Lemon, Symbol::Ball];

    pub fn emoji(self) -> &'static str {
        match self {
            Symbol::Orange => "🍊",
            Symbol::Apple => "🍎",
            Symbol::Lemon => "🍋",
            Symbol::Ball => "🏀",
        }
    }
}

/// Points awarded for clicking each symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardTable {
    pub orange: u32,
    pub apple: u32,
    pub lemon: u32,
    pub ball: u32,
}

impl Default for RewardTable {
    fn default() -> Self {
        Self {
            orange: ORANGE_REWARD,
            apple: APPLE_REWARD,
            lemon: LEMON_REWARD,
            ball: BALL_REWARD,
        }
    }
}

impl RewardTable {
    pub fn reward(&self, symbol: Symbol) -> u32 {
        match symbol {
            Symbol::Orange => self.orange,
            Symbol::Apple => self.apple,
            Symbol::Lemon => self.lemon,
            Symbol::Ball => self.ball,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    NotStarted,
    Running,
    Ended,
    Submitted,
}

/// One scored click. `index` is the zero-based play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickPathEntry {
    pub row: usize,
    pub col: usize,
    pub symbol: Symbol,
    pub index: usize,
}

impl ClickPathEntry {
    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

/// A cell as shown to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellView {
    pub symbol: Symbol,
    pub emoji: String,
    /// 1-based click order, if the cell was clicked.
    pub clicked_order: Option<usize>,
}

/// Serializable view of a session, pushed to clients after every action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub remaining_secs: u64,
    pub duration_secs: u64,
    pub score: u32,
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<Vec<CellView>>,
    pub click_path: Vec<ClickPathEntry>,
    pub path_display: String,
    pub player_name: Option<String>,
}
