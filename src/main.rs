//! Main entry point for the backend server.
//!
//! Initializes logging, opens the leaderboard, starts the session manager actor
//! and launches the HTTP server with the REST and WebSocket endpoints.

use std::sync::Arc;

use actix::Actor;
use actix_web::{web, App, HttpServer};
use log::info;

use config::server::ServerConfig;
use leaderboard::{FileLeaderboard, LeaderboardStore};
use server::game_session::server::GameSessionManager;

pub mod config;
mod server;
mod game;
mod leaderboard;

#[cfg(test)]
mod tests;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env();
    let file_store = FileLeaderboard::new(config.leaderboard_file.clone());
    info!("[Server] Leaderboard file: {}", file_store.path().display());
    let leaderboard: Arc<dyn LeaderboardStore> = Arc::new(file_store);

    // Start the GameSessionManager actor (creates and tracks every game session).
    let session_manager = GameSessionManager::new(Arc::clone(&leaderboard)).start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(session_manager, leaderboard));

    info!("[Server] Listening on {}:{}", config.host, config.port);

    // Start the HTTP server with REST and WebSocket endpoints.
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*"))
            )
            .wrap(actix_web::middleware::Logger::default())
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
