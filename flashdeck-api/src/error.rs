//! Error types for flashdeck-api
//!
//! Every failure leaves the server as the standard envelope
//! `{"success": false, "error": "..."}`. Database failures are logged in
//! full and answered with a per-operation message only.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use flashdeck_common::api::ApiResponse;
use thiserror::Error;
use tracing::{error, warn};

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_message(self) -> String {
        match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) | ApiError::Internal(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ApiResponse::<()>::error(self.into_message()));
        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Map a flashdeck-common error onto an HTTP error
///
/// `context` is the message clients see when the database fails.
pub trait ApiContext<T> {
    fn api_context(self, context: &str) -> ApiResult<T>;
}

impl<T> ApiContext<T> for flashdeck_common::Result<T> {
    fn api_context(self, context: &str) -> ApiResult<T> {
        self.map_err(|err| {
            if err.is_client_error() {
                warn!("{}: {}", context, err);
            } else {
                error!("{}: {}", context, err);
            }

            match err {
                flashdeck_common::Error::CardNotFound(_) => ApiError::NotFound(err.to_string()),
                flashdeck_common::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
                _ => ApiError::Internal(context.to_string()),
            }
        })
    }
}
