//! Router for the chat API: forwards a transcript to the AI provider and
//! returns the next response.

use std::sync::{Arc, RwLock};

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Json, Response},
    routing::post,
};
use http::StatusCode;

use super::public;
use crate::anthropic::{ChatMessage, complete};
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

/// Run one chat completion over the posted transcript.
async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::ChatRequest>,
) -> Result<Response, crate::api::public::ApiError> {
    let Some(messages) = payload.messages else {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            "Messages are required and must be an array",
        ));
    };
    if messages.is_empty() {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            "Messages are required and must be an array",
        ));
    }

    let mut transcript: Vec<ChatMessage> = Vec::with_capacity(messages.len());
    for message in &messages {
        match message.to_message() {
            Some(m) => transcript.push(m),
            None => {
                return Ok(error_response(
                    StatusCode::BAD_REQUEST,
                    &format!("Unknown message role: {}", message.role),
                ));
            }
        }
    }

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
        tracing::error!("Chat request received but no AI API key is configured");
        return Ok(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "API key not configured",
        ));
    }

    let resp = match complete(&transcript, &api_url, &api_key, &model).await {
        Ok(content) => Json(public::ChatResponse { content }).into_response(),
        Err(e) => {
            tracing::error!("Chat completion failed: {}", e);
            error_response(
                StatusCode::BAD_GATEWAY,
                &format!("Failed to get response from AI: {}", e),
            )
        }
    };

    Ok(resp)
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", post(chat_handler))
}
