//! Leaderboard storage and ranking.
//!
//! The game only needs two operations from storage: load every record and
//! append one. Ranking is computed on read.

pub mod file;
pub mod memory;

pub use file::FileLeaderboard;
pub use memory::MemoryLeaderboard;

use serde::{Serialize, Deserialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRecord {
    pub name: String,
    pub score: u32,
}

impl LeaderboardRecord {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self { name: name.into(), score }
    }
}

/// A ranked row, as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("leaderboard I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("leaderboard line {line} is malformed: {source}")]
    Corrupt {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode leaderboard record: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("leaderboard lock poisoned")]
    Poisoned,
}

/// Append-only record store shared by every session.
pub trait LeaderboardStore: Send + Sync {
    /// Every record, in arrival order.
    fn load(&self) -> Result<Vec<LeaderboardRecord>, LeaderboardError>;

    fn append(&self, record: &LeaderboardRecord) -> Result<(), LeaderboardError>;
}

/// Highest scores first, ties in arrival order, at most `n` entries.
pub fn top_n(mut records: Vec<LeaderboardRecord>, n: usize) -> Vec<RankedEntry> {
    // `sort_by` is stable, so equal scores keep arrival order.
    records.sort_by(|a, b| b.score.cmp(&a.score));
    records
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, record)| RankedEntry {
            rank: i + 1,
            name: record.name,
            score: record.score,
        })
        .collect()
}

pub fn top_scores(store: &dyn LeaderboardStore, n: usize) -> Result<Vec<RankedEntry>, LeaderboardError> {
    Ok(top_n(store.load()?, n))
}
