//! Card statistics endpoint
//!
//! Answered without the envelope: the browser extension popup reads
//! `totalCards` straight off the body.

use axum::{extract::State, Json};
use flashdeck_common::api::StatsResponse;

use crate::db;
use crate::error::{ApiContext, ApiResult};
use crate::AppState;

/// GET /api/stats
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<StatsResponse>> {
    let stats = db::count_stats(&state.db)
        .await
        .api_context("Failed to fetch stats")?;
    Ok(Json(stats))
}
