//! Database models

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;

use crate::api::types::CreateFlashcardRequest;
use crate::scoring::Bucket;
use crate::{Error, Result};

/// A stored flashcard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flashcard {
    pub id: String,
    pub front: String,
    pub back: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub tags: Vec<String>,
    pub point: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Flashcard {
    pub fn bucket(&self) -> Bucket {
        Bucket::for_points(self.point)
    }
}

/// Raw `flashcards` row; tags are stored as a JSON array in a TEXT column
#[derive(Debug, sqlx::FromRow)]
pub struct FlashcardRow {
    pub id: String,
    pub front: String,
    pub back: String,
    pub hint: Option<String>,
    pub tags: Json<Vec<String>>,
    pub point: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FlashcardRow> for Flashcard {
    fn from(row: FlashcardRow) -> Self {
        Self {
            id: row.id,
            front: row.front,
            back: row.back,
            hint: row.hint,
            tags: row.tags.0,
            point: row.point,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Validated card content, ready to insert or to overwrite an existing card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFlashcard {
    pub front: String,
    pub back: String,
    pub hint: Option<String>,
    pub tags: Vec<String>,
}

impl NewFlashcard {
    /// Validate a create/update request
    ///
    /// Front and back must be present and non-blank; they are stored as
    /// sent, whitespace included. A blank hint is dropped. Tags go through
    /// [`normalize_tags`].
    pub fn from_request(request: CreateFlashcardRequest) -> Result<Self> {
        let front = required_text(request.front, "front")?;
        let back = required_text(request.back, "back")?;

        let hint = request
            .hint
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty());

        Ok(Self {
            front,
            back,
            hint,
            tags: normalize_tags(request.tags.unwrap_or_default()),
        })
    }
}

fn required_text(value: Option<String>, side: &str) -> Result<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(Error::InvalidInput(format!(
            "{} of flashcard are required",
            side
        ))),
    }
}

/// Trim tags, drop blank ones and remove duplicates (first occurrence wins)
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !normalized.iter().any(|t| t == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}
