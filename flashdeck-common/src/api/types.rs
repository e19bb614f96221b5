//! Shared API request/response types
//!
//! Every JSON endpoint under `/api/flashcards` answers with the
//! [`ApiResponse`] envelope:
//!
//! ```json
//! { "success": true, "data": { ... } }
//! { "success": false, "error": "back of flashcard are required" }
//! ```

use serde::{Deserialize, Serialize};

use crate::scoring::Difficulty;

// ========================================
// Envelope
// ========================================

/// Response envelope used by the flashcard endpoints
///
/// # Examples
///
/// ```
/// use flashdeck_common::api::types::ApiResponse;
///
/// let ok = ApiResponse::ok(vec!["card"]);
/// assert!(ok.success);
///
/// let err: ApiResponse<()> = ApiResponse::error("Failed to fetch flashcards");
/// assert!(!err.success);
/// assert!(err.data.is_none());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// Successful response carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: Some(message.into()),
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }
}

// ========================================
// Requests
// ========================================

/// POST /api/flashcards body
///
/// `front` and `back` are optional at the serde level so a missing field
/// reaches validation and produces the documented message instead of a
/// generic deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CreateFlashcardRequest {
    #[serde(default)]
    pub front: Option<String>,
    #[serde(default)]
    pub back: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// PUT /api/flashcards/:id body (full replacement of the editable fields)
pub type UpdateFlashcardRequest = CreateFlashcardRequest;

/// PATCH /api/flashcards/update-difficulty body
///
/// Only the exact lowercase names `wrong`, `hard` and `easy` deserialize;
/// anything else is rejected by the JSON extractor.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateDifficultyRequest {
    pub id: String,
    pub difficulty_level: Difficulty,
}

// ========================================
// Responses
// ========================================

/// GET /api/stats response (read by the browser extension popup)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_cards: i64,
    pub practice_cards: i64,
    pub mastered_cards: i64,
}

// ========================================
// Tests
// ========================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_omits_absent_fields() {
        let json = serde_json::to_value(ApiResponse::ok(3)).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": 3}));

        let json = serde_json::to_value(ApiResponse::<()>::error("boom")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "boom"}));
    }

    #[test]
    fn test_envelope_message_only() {
        let json =
            serde_json::to_value(ApiResponse::<()>::message("Flashcard deleted successfully"))
                .unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Flashcard deleted successfully");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_create_request_allows_missing_fields() {
        let request: CreateFlashcardRequest =
            serde_json::from_str(r#"{"front": "Incomplete card", "hint": "Missing back side"}"#)
                .unwrap();

        assert_eq!(request.front.as_deref(), Some("Incomplete card"));
        assert!(request.back.is_none());
        assert!(request.tags.is_none());
    }

    #[test]
    fn test_stats_camel_case() {
        let stats = StatsResponse {
            total_cards: 7,
            practice_cards: 4,
            mastered_cards: 3,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalCards"], 7);
        assert_eq!(json["practiceCards"], 4);
        assert_eq!(json["masteredCards"], 3);
    }

    #[test]
    fn test_update_difficulty_request() {
        let request: UpdateDifficultyRequest = serde_json::from_str(
            r#"{"id": "00000000-0000-0000-0000-000000000000", "difficulty_level": "hard"}"#,
        )
        .unwrap();
        assert_eq!(request.difficulty_level, Difficulty::Hard);
    }

    #[test]
    fn test_update_difficulty_request_is_case_sensitive() {
        for level in ["EASY", " hard ", "Wrong", "medium"] {
            let body = serde_json::json!({
                "id": "00000000-0000-0000-0000-000000000000",
                "difficulty_level": level,
            });
            assert!(
                serde_json::from_value::<UpdateDifficultyRequest>(body).is_err(),
                "{:?} should be rejected",
                level
            );
        }
    }
}
