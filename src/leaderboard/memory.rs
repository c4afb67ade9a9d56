use std::sync::Mutex;

use super::{LeaderboardError, LeaderboardRecord, LeaderboardStore};

/// Process-local store. Used in tests and when no file is configured.
#[derive(Debug, Default)]
pub struct MemoryLeaderboard {
    records: Mutex<Vec<LeaderboardRecord>>,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<LeaderboardRecord>) -> Self {
        Self { records: Mutex::new(records) }
    }
}

impl LeaderboardStore for MemoryLeaderboard {
    fn load(&self) -> Result<Vec<LeaderboardRecord>, LeaderboardError> {
        let records = self.records.lock().map_err(|_| LeaderboardError::Poisoned)?;
        Ok(records.clone())
    }

    fn append(&self, record: &LeaderboardRecord) -> Result<(), LeaderboardError> {
        let mut records = self.records.lock().map_err(|_| LeaderboardError::Poisoned)?;
        records.push(record.clone());
        Ok(())
    }
}
