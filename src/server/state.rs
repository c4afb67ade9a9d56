// src/server/state.rs

//! Application state for the backend server.
//!
//! Holds the session manager address and the shared leaderboard store.
//! Used to share state between HTTP/WebSocket handlers and the actor system.

use std::sync::Arc;

use actix::Addr;
use crate::leaderboard::LeaderboardStore;
use crate::server::game_session::server::GameSessionManager;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the game session manager actor (creates and looks up sessions).
    pub session_manager: Addr<GameSessionManager>,
    /// Leaderboard shared by every session.
    pub leaderboard: Arc<dyn LeaderboardStore>,
}

impl AppState {
    /// Create a new AppState with the given manager address and store.
    pub fn new(
        session_manager: Addr<GameSessionManager>,
        leaderboard: Arc<dyn LeaderboardStore>,
    ) -> Self {
        AppState {
            session_manager,
            leaderboard,
        }
    }
}
