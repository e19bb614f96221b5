//! Database access layer for flashdeck-api
//!
//! Schema creation and migrations live in flashdeck-common; this module
//! holds the queries behind the HTTP handlers.

pub mod flashcards;

pub use flashcards::{
    apply_rating, count_stats, delete_flashcard, get_flashcard, insert_flashcard,
    list_by_bucket, list_by_tag, list_flashcards, update_flashcard,
};
