//! flashdeck-api library - flashcard storage and scoring service
//!
//! Serves the JSON API used by the flashcard web app and the browser
//! extension popup.

use axum::Router;
use sqlx::SqlitePool;

pub mod api;
pub mod db;
pub mod error;
pub mod server;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
///
/// Static segments (`practice`, `mastered`, `update-difficulty`) take
/// priority over the `:id` capture.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, patch};

    let flashcards = Router::new()
        .route(
            "/api/flashcards",
            get(api::list_flashcards).post(api::create_flashcard),
        )
        .route("/api/flashcards/tag/:tag", get(api::list_by_tag))
        .route("/api/flashcards/practice", get(api::list_practice))
        .route("/api/flashcards/mastered", get(api::list_mastered))
        .route(
            "/api/flashcards/update-difficulty",
            patch(api::update_difficulty),
        )
        .route(
            "/api/flashcards/:id",
            get(api::get_flashcard)
                .put(api::update_flashcard)
                .delete(api::delete_flashcard),
        )
        // Singular paths kept for older extension builds
        .route(
            "/api/flashcard/:id",
            get(api::get_flashcard).delete(api::delete_flashcard),
        );

    Router::new()
        .merge(flashcards)
        .route("/api/stats", get(api::get_stats))
        .merge(api::health_routes())
        .with_state(state)
}
