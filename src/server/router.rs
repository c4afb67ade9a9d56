//! HTTP and WebSocket routing configuration.
//!
//! Defines the REST endpoints and the game WebSocket endpoint.

use actix_web::web;
use crate::server::api::{create_session, get_session, leaderboard};
use crate::server::game_session::session::ws_game;

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/sessions")
            .route(web::post().to(create_session))
    )
    .service(
        web::resource("/api/sessions/{session_id}")
            .route(web::get().to(get_session))
    )
    .service(
        web::resource("/api/leaderboard")
            .route(web::get().to(leaderboard))
    )
    .service(
        web::resource("/ws/game/{session_id}")
            .to(ws_game)
    );
}
