//! Flashcard CRUD and rating endpoints
//!
//! All responses use the `ApiResponse` envelope.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use flashdeck_common::api::{
    ApiResponse, CreateFlashcardRequest, UpdateDifficultyRequest, UpdateFlashcardRequest,
};
use flashdeck_common::db::{Flashcard, NewFlashcard};
use flashdeck_common::Bucket;
use tracing::info;
use uuid::Uuid;

use crate::db;
use crate::error::{ApiContext, ApiError, ApiResult};
use crate::AppState;

type CardResponse = (StatusCode, Json<ApiResponse<Flashcard>>);
type CardListResponse = Json<ApiResponse<Vec<Flashcard>>>;

/// Card ids are UUIDs; reject anything else before touching the database
fn parse_id(raw: &str) -> ApiResult<String> {
    Uuid::parse_str(raw)
        .map(|id| id.to_string())
        .map_err(|_| ApiError::BadRequest(format!("Invalid flashcard id: {}", raw)))
}

/// GET /api/flashcards
pub async fn list_flashcards(State(state): State<AppState>) -> ApiResult<CardListResponse> {
    let cards = db::list_flashcards(&state.db)
        .await
        .api_context("Failed to fetch flashcards")?;
    Ok(Json(ApiResponse::ok(cards)))
}

/// GET /api/flashcards/tag/:tag
pub async fn list_by_tag(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> ApiResult<CardListResponse> {
    let cards = db::list_by_tag(&state.db, tag.trim())
        .await
        .api_context("Failed to fetch flashcards by tag")?;
    Ok(Json(ApiResponse::ok(cards)))
}

/// GET /api/flashcards/practice
///
/// Cards below the mastery threshold.
pub async fn list_practice(State(state): State<AppState>) -> ApiResult<CardListResponse> {
    let cards = db::list_by_bucket(&state.db, Bucket::Practice)
        .await
        .api_context("Failed to fetch practice flashcards")?;
    Ok(Json(ApiResponse::ok(cards)))
}

/// GET /api/flashcards/mastered
pub async fn list_mastered(State(state): State<AppState>) -> ApiResult<CardListResponse> {
    let cards = db::list_by_bucket(&state.db, Bucket::Mastered)
        .await
        .api_context("Failed to fetch mastered flashcards")?;
    Ok(Json(ApiResponse::ok(cards)))
}

/// GET /api/flashcards/:id (and legacy GET /api/flashcard/:id)
pub async fn get_flashcard(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<CardResponse> {
    let id = parse_id(&id)?;
    let card = db::get_flashcard(&state.db, &id)
        .await
        .api_context("Failed to fetch flashcard")?;
    Ok((StatusCode::OK, Json(ApiResponse::ok(card))))
}

/// POST /api/flashcards
///
/// **Request:** `{"front": "...", "back": "...", "hint": "...", "tags": ["..."]}`
///
/// **Errors:**
/// - 400: missing/blank front or back, malformed body
/// - 500: database failure
pub async fn create_flashcard(
    State(state): State<AppState>,
    payload: Result<Json<CreateFlashcardRequest>, JsonRejection>,
) -> ApiResult<CardResponse> {
    let Json(request) = payload?;
    let card = NewFlashcard::from_request(request).api_context("Failed to create flashcard")?;

    let created = db::insert_flashcard(&state.db, card)
        .await
        .api_context("Failed to create flashcard")?;

    info!("Created flashcard {} ({} tags)", created.id, created.tags.len());
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}

/// PUT /api/flashcards/:id
///
/// Replaces front, back, hint and tags. Points are not touched.
pub async fn update_flashcard(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateFlashcardRequest>, JsonRejection>,
) -> ApiResult<CardResponse> {
    let id = parse_id(&id)?;
    let Json(request) = payload?;
    let card = NewFlashcard::from_request(request).api_context("Failed to update flashcard")?;

    let updated = db::update_flashcard(&state.db, &id, card)
        .await
        .api_context("Failed to update flashcard")?;

    info!("Updated flashcard {}", updated.id);
    Ok((StatusCode::OK, Json(ApiResponse::ok(updated))))
}

/// PATCH /api/flashcards/update-difficulty
///
/// **Request:** `{"id": "<uuid>", "difficulty_level": "wrong" | "hard" | "easy"}`
///
/// Any other level is a 400 carrying the JSON rejection text.
pub async fn update_difficulty(
    State(state): State<AppState>,
    payload: Result<Json<UpdateDifficultyRequest>, JsonRejection>,
) -> ApiResult<CardResponse> {
    let Json(request) = payload?;
    let id = parse_id(&request.id)?;
    let difficulty = request.difficulty_level;

    let updated = db::apply_rating(&state.db, &id, difficulty)
        .await
        .api_context("Failed to update flashcard difficulty")?;

    info!(
        "Rated flashcard {} as {}: {} points ({:?})",
        updated.id,
        difficulty,
        updated.point,
        updated.bucket()
    );
    Ok((StatusCode::OK, Json(ApiResponse::ok(updated))))
}

/// DELETE /api/flashcards/:id (and legacy DELETE /api/flashcard/:id)
pub async fn delete_flashcard(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let id = parse_id(&id)?;
    db::delete_flashcard(&state.db, &id)
        .await
        .api_context("Failed to delete flashcard")?;

    info!("Deleted flashcard {}", id);
    Ok(Json(ApiResponse::message("Flashcard deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_normalizes_case() {
        let id = parse_id("6F9619FF-8B86-D011-B42D-00C04FC964FF").unwrap();
        assert_eq!(id, "6f9619ff-8b86-d011-b42d-00c04fc964ff");
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        match parse_id("42") {
            Err(ApiError::BadRequest(msg)) => assert_eq!(msg, "Invalid flashcard id: 42"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
