//! # Flashdeck Common Library
//!
//! Shared code for the flashdeck service:
//! - Flashcard model and database bootstrap
//! - Scoring policy (difficulty ratings, practice/mastered buckets)
//! - API request/response types
//! - Configuration loading

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod scoring;

pub use error::{Error, Result};
pub use scoring::{Bucket, Difficulty, MASTERY_THRESHOLD};
