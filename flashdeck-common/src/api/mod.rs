//! API module for shared HTTP request/response types
//!
//! This module contains ONLY serde types and pure helpers. The axum
//! wiring lives in flashdeck-api.

pub mod types;

pub use types::{
    ApiResponse, CreateFlashcardRequest, StatsResponse, UpdateDifficultyRequest,
    UpdateFlashcardRequest,
};
