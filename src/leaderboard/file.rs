//! JSON-lines leaderboard file: one `{"name": ..., "score": ...}` object per line.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::debug;

use super::{LeaderboardError, LeaderboardRecord, LeaderboardStore};

pub struct FileLeaderboard {
    path: PathBuf,
    // Serializes appends from this process so lines never interleave.
    write_lock: Mutex<()>,
}

impl FileLeaderboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LeaderboardStore for FileLeaderboard {
    fn load(&self) -> Result<Vec<LeaderboardRecord>, LeaderboardError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line)
                .map_err(|source| LeaderboardError::Corrupt { line: i + 1, source })?;
            records.push(record);
        }
        debug!("[Leaderboard] Loaded {} records", records.len());
        Ok(records)
    }

    fn append(&self, record: &LeaderboardRecord) -> Result<(), LeaderboardError> {
        let mut line = serde_json::to_string(record).map_err(LeaderboardError::Encode)?;
        line.push('\n');

        let _guard = self.write_lock.lock().map_err(|_| LeaderboardError::Poisoned)?;
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        // One write per record; with O_APPEND the line lands whole at the end of the file.
        file.write_all(line.as_bytes())?;
        file.flush()?;
        debug!("[Leaderboard] Appended {} ({})", record.name, record.score);
        Ok(())
    }
}
