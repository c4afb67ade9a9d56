/// Game configuration constants.
/// 
/// This module defines the main gameplay parameters such as grid dimensions,
/// game duration, rewards and how many of each symbol the generator places.
use crate::game::types::Symbol;

/// Number of rows in the game grid.
pub const GRID_ROWS: usize = 5;

/// Number of columns in the game grid.
pub const GRID_COLS: usize = 10;

/// Duration of a game in seconds, counted from `Start`.
pub const GAME_DURATION_SECS: u64 = 10;

/// Failed (collision) samples allowed per symbol before placement stops short.
pub const PLACEMENT_ATTEMPT_CAP: u32 = 1000;

/// Maximum length of a leaderboard name, in characters.
pub const MAX_NAME_CHARS: usize = 20;

/// Number of leaderboard rows shown after a game.
pub const LEADERBOARD_TOP_N: usize = 10;

/// Upper bound on `limit` accepted by the leaderboard endpoint.
pub const LEADERBOARD_MAX_LIMIT: usize = 100;

/// Seconds a session may sit without any connection before it is dropped.
pub const IDLE_SESSION_SECS: u64 = 300;

/// Interval (in seconds) at which a running session polls its timer and pushes updates.
pub const TIMER_POLL_SECS: u64 = 1;

pub const ORANGE_REWARD: u32 = 50;
pub const APPLE_REWARD: u32 = 20;
pub const LEMON_REWARD: u32 = 10;
pub const BALL_REWARD: u32 = 0;

/// Placement order, counts and cluster flags. Earlier entries get first pick of cells.
pub const PLACEMENTS: [(Symbol, usize, bool); 4] = [
    (Symbol::Orange, 5, false),
    (Symbol::Apple, 10, false),
    (Symbol::Lemon, 20, true),
    (Symbol::Ball, 15, true),
];

/// Symbol written into every cell left empty after placement.
pub const DECOY: Symbol = Symbol::Ball;
