//! Public API types

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;

// Errors

/// Failure of the handler plumbing itself. Domain outcomes (validation
/// problems, backend-reported errors, authorization-required) are modeled
/// as response payloads by each route, not as this error.
pub struct ApiError(anyhow::Error);

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Always log the error
        tracing::error!("{}", self.0);

        // Respond with an error status
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Something went wrong: {}", self.0),
        )
            .into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// The `{message}` error body the calendar routes respond with.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// The `{error}` error body the AI-backed routes respond with.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// Re-export public types from each route

pub mod calendar {
    pub use crate::api::routes::calendar::public::*;
}

pub mod chat {
    pub use crate::api::routes::chat::public::*;
}

pub mod flashcards {
    pub use crate::api::routes::flashcards::public::*;
}

pub mod schedule {
    pub use crate::api::routes::schedule::public::*;
}

pub mod teachback {
    pub use crate::api::routes::teachback::public::*;
}
