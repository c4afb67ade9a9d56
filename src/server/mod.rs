// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the main backend server components, including:
//! - Application state management
//! - HTTP/WebSocket routing
//! - REST endpoints (session creation, snapshots, leaderboard)
//! - Game session orchestration (one actor per session, player actions)

pub mod state;
pub mod router;
pub mod api;
pub mod game_session;
pub mod ws_error;
