//! HTTP API handlers for flashdeck-api

pub mod flashcards;
pub mod health;
pub mod stats;

pub use flashcards::{
    create_flashcard, delete_flashcard, get_flashcard, list_by_tag, list_flashcards,
    list_mastered, list_practice, update_difficulty, update_flashcard,
};
pub use health::health_routes;
pub use stats::get_stats;
