//! Router for the flashcards API: prompts the AI with study material and
//! parses the returned Q/A pairs.

use std::sync::{Arc, RwLock};

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Json, Response},
    routing::post,
};
use http::StatusCode;

use super::public;
use crate::ai::flashcards::{MAX_CARDS, flashcards_prompt, parse_flashcards, suggested_card_count};
use crate::anthropic::{ChatMessage, Role, complete};
use crate::api::public::ErrorResponse;
use crate::api::state::AppState;
use crate::core::AppConfig;

type SharedState = Arc<RwLock<AppState>>;

fn error_response(status: StatusCode, error: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

/// Generate a deck of flashcards from study material.
async fn flashcards_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::FlashcardsRequest>,
) -> Result<Response, crate::api::public::ApiError> {
    let material = payload.material.unwrap_or_default();
    if material.trim().is_empty() {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            "Material is required",
        ));
    }

    let count = match payload.count {
        Some(0) => {
            return Ok(error_response(
                StatusCode::BAD_REQUEST,
                "Flashcard count must be at least 1",
            ));
        }
        Some(count) => count.min(MAX_CARDS),
        None => suggested_card_count(&material),
    };

    let (api_url, api_key, model) = {
        let shared_state = state.read().expect("Unable to read share state");
        let AppConfig {
            anthropic_api_url,
            anthropic_api_key,
            anthropic_model,
            ..
        } = &shared_state.config;
        (
            anthropic_api_url.clone(),
            anthropic_api_key.clone(),
            anthropic_model.clone(),
        )
    };

    if api_key.is_empty() {
        return Ok(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "API key not configured",
        ));
    }

    let prompt = flashcards_prompt(material.trim(), payload.subject.as_deref(), count)?;
    let request = vec![ChatMessage::new(Role::User, &prompt)];

    let resp = match complete(&request, &api_url, &api_key, &model).await {
        Ok(output) => match parse_flashcards(&output) {
            Ok(cards) => {
                let count = cards.len();
                Json(public::FlashcardsResponse {
                    cards: cards.into_iter().map(Into::into).collect(),
                    count,
                })
                .into_response()
            }
            Err(e) => {
                tracing::error!("Flashcard output could not be parsed: {}", e);
                error_response(
                    StatusCode::BAD_GATEWAY,
                    "Unexpected response format from AI",
                )
            }
        },
        Err(e) => {
            tracing::error!("Flashcard completion failed: {}", e);
            error_response(
                StatusCode::BAD_GATEWAY,
                &format!("Failed to get response from AI: {}", e),
            )
        }
    };

    Ok(resp)
}

/// Create the flashcards router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", post(flashcards_handler))
}
