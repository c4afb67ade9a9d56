use std::collections::HashMap;
use std::time::Instant;

use log::{debug, info, warn};
use rand::Rng;
use thiserror::Error;

use crate::config::game::{GAME_DURATION_SECS, GRID_COLS, GRID_ROWS, MAX_NAME_CHARS};
use crate::game::grid::{generate_grid, GenerationReport, Grid, PlacementSpec};
use crate::game::score::{path_display, score_of};
use crate::game::timer::remaining_secs;
use crate::game::types::{CellView, ClickPathEntry, Phase, Position, RewardTable, SessionSnapshot};
use crate::leaderboard::{LeaderboardError, LeaderboardRecord, LeaderboardStore};

/// Everything needed to build (and rebuild) a session's board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub duration_secs: u64,
    pub rewards: RewardTable,
    pub placement: PlacementSpec,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            duration_secs: GAME_DURATION_SECS,
            rewards: RewardTable::default(),
            placement: PlacementSpec::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("name is empty")]
    Empty,
    #[error("name is longer than {max} characters")]
    TooLong { max: usize },
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("scores can only be submitted once, after the game ends (phase is {0:?})")]
    WrongPhase(Phase),
    #[error("invalid name: {0}")]
    InvalidName(#[from] NameError),
    #[error(transparent)]
    Storage(#[from] LeaderboardError),
}

/// Trim a player name and check it fits on the leaderboard.
pub fn validate_name(raw: &str) -> Result<String, NameError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(NameError::TooLong { max: MAX_NAME_CHARS });
    }
    Ok(name.to_string())
}

/// One player's game: board, phase, timer, score and click path.
///
/// Every operation takes the observation instant, so the state machine is a
/// function of `(state, now)`. `Running -> Ended` happens on the first
/// observation at which the timer reads zero.
#[derive(Debug, Clone)]
pub struct SessionState {
    config: GameConfig,
    grid: Grid,
    report: GenerationReport,
    phase: Phase,
    started_at: Option<Instant>,
    score: u32,
    click_path: Vec<ClickPathEntry>,
    clicked: HashMap<Position, usize>,
    player_name: Option<String>,
}

impl SessionState {
    /// Create a fresh session with a newly generated grid.
    pub fn new<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Self {
        let (grid, report) = generate_grid(config.rows, config.cols, &config.placement, rng);
        let mut state = Self::with_grid(config, grid);
        state.report = report;
        state
    }

    /// Create a session around a fixed grid.
    pub fn with_grid(config: GameConfig, grid: Grid) -> Self {
        Self {
            config,
            grid,
            report: GenerationReport::default(),
            phase: Phase::NotStarted,
            started_at: None,
            score: 0,
            click_path: Vec::new(),
            clicked: HashMap::new(),
            player_name: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation_report(&self) -> &GenerationReport {
        &self.report
    }

    /// Phase as of the last observation. Use [`observe`](Self::observe) for the current one.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Score rebuilt from the click path alone.
    pub fn recomputed_score(&self) -> u32 {
        score_of(&self.click_path, &self.config.rewards)
    }

    pub fn click_path(&self) -> &[ClickPathEntry] {
        &self.click_path
    }

    pub fn player_name(&self) -> Option<&str> {
        self.player_name.as_deref()
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// Begin the game. Only valid once, from `NotStarted`.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.phase != Phase::NotStarted {
            debug!("[Session] Ignoring start in phase {:?}", self.phase);
            return false;
        }
        self.started_at = Some(now);
        self.phase = Phase::Running;
        info!("[Session] Game started ({}s)", self.config.duration_secs);
        true
    }

    /// Seconds left at `now`. Reading zero while running ends the game.
    pub fn remaining_secs(&mut self, now: Instant) -> u64 {
        self.observe(now);
        self.remaining_at(now)
    }

    /// Seconds left at `now`, without applying the end-of-game transition.
    pub fn remaining_at(&self, now: Instant) -> u64 {
        match self.started_at {
            Some(started_at) => remaining_secs(started_at, now, self.config.duration_secs),
            None => self.config.duration_secs,
        }
    }

    /// Apply any time-driven transition and return the current phase.
    pub fn observe(&mut self, now: Instant) -> Phase {
        if self.phase == Phase::Running && self.remaining_at(now) == 0 {
            self.phase = Phase::Ended;
            info!("[Session] Time's up, final score {}", self.score);
        }
        self.phase
    }

    /// Click a cell. Returns the new path entry, or `None` if the click was ignored
    /// (not running, time up, out of bounds, or already clicked).
    pub fn click_cell(&mut self, row: usize, col: usize, now: Instant) -> Option<ClickPathEntry> {
        if self.observe(now) != Phase::Running {
            return None;
        }
        let pos = Position::new(row, col);
        if self.clicked.contains_key(&pos) {
            return None;
        }
        let symbol = self.grid.get(pos)?;

        let entry = ClickPathEntry {
            row,
            col,
            symbol,
            index: self.click_path.len(),
        };
        self.clicked.insert(pos, entry.index);
        self.click_path.push(entry);
        self.score += self.config.rewards.reward(symbol);
        debug!(
            "[Session] Click #{} at ({}, {}) on {:?}, score {}",
            entry.index + 1, row, col, symbol, self.score
        );
        Some(entry)
    }

    /// Record the final score under `name`. Only valid once, after the game ended.
    ///
    /// On any error the phase is unchanged, so the caller can prompt again.
    pub fn submit(
        &mut self,
        name: &str,
        store: &dyn LeaderboardStore,
        now: Instant,
    ) -> Result<LeaderboardRecord, SubmitError> {
        let phase = self.observe(now);
        if phase != Phase::Ended {
            return Err(SubmitError::WrongPhase(phase));
        }
        let name = validate_name(name)?;
        let record = LeaderboardRecord::new(name.clone(), self.score);
        if let Err(e) = store.append(&record) {
            warn!("[Session] Could not save score for {}: {}", name, e);
            return Err(e.into());
        }
        self.player_name = Some(name);
        self.phase = Phase::Submitted;
        info!("[Session] Submitted {} with {} points", record.name, record.score);
        Ok(record)
    }

    /// Start over with a fresh board. Only valid after submitting.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.phase != Phase::Submitted {
            debug!("[Session] Ignoring reset in phase {:?}", self.phase);
            return false;
        }
        let config = self.config.clone();
        *self = Self::new(config, rng);
        info!("[Session] Reset for a new game");
        true
    }

    /// Client-facing view at `now`.
    pub fn snapshot(&mut self, now: Instant) -> SessionSnapshot {
        let remaining_secs = self.remaining_secs(now);
        let cells = self
            .grid
            .cells()
            .iter()
            .enumerate()
            .map(|(row, symbols)| {
                symbols
                    .iter()
                    .enumerate()
                    .map(|(col, &symbol)| CellView {
                        symbol,
                        emoji: symbol.emoji().to_string(),
                        clicked_order: self.clicked.get(&Position::new(row, col)).map(|i| i + 1),
                    })
                    .collect()
            })
            .collect();

        SessionSnapshot {
            phase: self.phase,
            remaining_secs,
            duration_secs: self.config.duration_secs,
            score: self.score,
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            cells,
            click_path: self.click_path.clone(),
            path_display: path_display(&self.click_path),
            player_name: self.player_name.clone(),
        }
    }
}
