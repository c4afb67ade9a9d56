//! REST endpoints.
//!
//! Sessions are created over HTTP and then played over `/ws/game/{session_id}`.
//! The leaderboard can be read without a session.

use std::sync::Arc;

use actix_web::{web, HttpResponse, Error};
use actix_web::http::StatusCode;
use log::error;
use serde::{Serialize, Deserialize};
use uuid::Uuid;

use crate::config::game::{LEADERBOARD_MAX_LIMIT, LEADERBOARD_TOP_N};
use crate::leaderboard::top_scores;
use crate::server::game_session::messages::GetSnapshot;
use crate::server::game_session::server::{CreateSession, GetGameSession};
use crate::server::state::AppState;
use crate::server::ws_error::http_error_response;

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

/// `POST /api/sessions`: create a session with a fresh grid.
pub async fn create_session(data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    let session_id = data.session_manager
        .send(CreateSession)
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;
    Ok(HttpResponse::Created().json(SessionCreated { session_id }))
}

/// `GET /api/sessions/{session_id}`: current snapshot of a session.
pub async fn get_session(
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session_id = path.into_inner();
    let session = data.session_manager
        .send(GetGameSession { session_id })
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;
    let Ok(addr) = session else {
        return Ok(http_error_response(
            "SESSION_NOT_FOUND",
            "Game session not found",
            Some(serde_json::json!({ "session_id": session_id })),
            StatusCode::NOT_FOUND,
        ));
    };
    let snapshot = addr.send(GetSnapshot)
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().json(snapshot))
}

/// `GET /api/leaderboard?limit=N`: top scores, best first.
pub async fn leaderboard(
    query: web::Query<LeaderboardQuery>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let limit = query.limit.unwrap_or(LEADERBOARD_TOP_N).min(LEADERBOARD_MAX_LIMIT);
    let store = Arc::clone(&data.leaderboard);
    // File reads stay off the async workers.
    let result = tokio::task::spawn_blocking(move || top_scores(store.as_ref(), limit))
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;
    match result {
        Ok(entries) => Ok(HttpResponse::Ok().json(entries)),
        Err(e) => {
            error!("[Leaderboard] Load failed: {}", e);
            Ok(http_error_response(
                "LEADERBOARD_UNAVAILABLE",
                "The leaderboard could not be loaded.",
                None,
                StatusCode::SERVICE_UNAVAILABLE,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix::Actor;
    use actix_web::{test, App};

    use crate::game::types::{Phase, SessionSnapshot};
    use crate::leaderboard::{
        LeaderboardError, LeaderboardRecord, LeaderboardStore, MemoryLeaderboard, RankedEntry,
    };
    use crate::server::game_session::server::GameSessionManager;

    struct BrokenStore;

    impl LeaderboardStore for BrokenStore {
        fn load(&self) -> Result<Vec<LeaderboardRecord>, LeaderboardError> {
            Err(LeaderboardError::Poisoned)
        }

        fn append(&self, _record: &LeaderboardRecord) -> Result<(), LeaderboardError> {
            Err(LeaderboardError::Poisoned)
        }
    }

    fn app_state(store: Arc<dyn LeaderboardStore>) -> web::Data<AppState> {
        let manager = GameSessionManager::new(Arc::clone(&store)).start();
        web::Data::new(AppState::new(manager, store))
    }

    #[actix_web::test]
    async fn test_create_then_get_session() {
        let state = app_state(Arc::new(MemoryLeaderboard::new()));
        let app = test::init_service(
            App::new().app_data(state).configure(crate::server::router::config),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/sessions").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: SessionCreated = test::read_body_json(resp).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/sessions/{}", created.session_id))
            .to_request();
        let snapshot: SessionSnapshot = test::call_and_read_body_json(&app, req).await;
        assert_eq!(snapshot.phase, Phase::NotStarted);
        assert_eq!(snapshot.rows, 5);
        assert_eq!(snapshot.cols, 10);
        assert_eq!(snapshot.remaining_secs, 10);
        assert_eq!(snapshot.score, 0);
    }

    #[actix_web::test]
    async fn test_unknown_session_is_404() {
        let state = app_state(Arc::new(MemoryLeaderboard::new()));
        let app = test::init_service(
            App::new().app_data(state).configure(crate::server::router::config),
        )
        .await;
        let req = test::TestRequest::get()
            .uri(&format!("/api/sessions/{}", Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_leaderboard_ranking_and_limit() {
        let store = Arc::new(MemoryLeaderboard::with_records(vec![
            LeaderboardRecord::new("Ann", 50),
            LeaderboardRecord::new("Bob", 80),
            LeaderboardRecord::new("Cid", 50),
        ]));
        let state = app_state(store);
        let app = test::init_service(
            App::new().app_data(state).configure(crate::server::router::config),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/leaderboard").to_request();
        let entries: Vec<RankedEntry> = test::call_and_read_body_json(&app, req).await;
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Bob", "Ann", "Cid"]);

        let req = test::TestRequest::get().uri("/api/leaderboard?limit=1").to_request();
        let entries: Vec<RankedEntry> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(entries, vec![RankedEntry { rank: 1, name: "Bob".into(), score: 80 }]);
    }

    #[actix_web::test]
    async fn test_leaderboard_failure_is_503() {
        let state = app_state(Arc::new(BrokenStore));
        let app = test::init_service(
            App::new().app_data(state).configure(crate::server::router::config),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/leaderboard").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
