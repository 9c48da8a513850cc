//! Router for the teach-back API: starting a session, answering the next
//! question, and ending with feedback.

use std::sync::{Arc, RwLock};

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Json, Response},
    routing::post,
};
use http::StatusCode;

use super::public;
use crate::ai::persona::{Difficulty, GradeBand};
use crate::ai::teachback::{
    NEEDS_ANSWER_MESSAGE, answered_questions, feedback_prompt, intro_prompt, is_end_message,
    next_question_nudge,
};
use crate::anthropic::{ChatMessage, Role, complete};
use crate::api::public::ErrorResponse;
use crate::api::state::AppState;
use crate::core::AppConfig;

type SharedState = Arc<RwLock<AppState>>;

struct AiSettings {
    api_url: String,
    api_key: String,
    model: String,
}

fn ai_settings(state: &SharedState) -> AiSettings {
    let shared_state = state.read().expect("Unable to read share state");
    let AppConfig {
        anthropic_api_url,
        anthropic_api_key,
        anthropic_model,
        ..
    } = &shared_state.config;
    AiSettings {
        api_url: anthropic_api_url.clone(),
        api_key: anthropic_api_key.clone(),
        model: anthropic_model.clone(),
    }
}

fn error_response(status: StatusCode, error: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

fn ai_error_response(e: anyhow::Error) -> Response {
    tracing::error!("Teach-back completion failed: {}", e);
    error_response(
        StatusCode::BAD_GATEWAY,
        &format!("Failed to get response from AI: {}", e),
    )
}

/// Start a session: build the persona prompt and get the first question.
async fn start_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::TeachbackStartRequest>,
) -> Result<Response, crate::api::public::ApiError> {
    let topic = payload.topic.unwrap_or_default();
    if topic.trim().is_empty() {
        return Ok(error_response(StatusCode::BAD_REQUEST, "Topic is required"));
    }

    let Some(grade) = GradeBand::from_level(payload.grade.unwrap_or(1)) else {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            "Grade must be between 1 and 13",
        ));
    };
    let difficulty = payload.difficulty.unwrap_or_else(|| "normal".to_string());
    let Some(difficulty) = Difficulty::from_name(&difficulty) else {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            "Difficulty must be easy, normal or difficult",
        ));
    };

    let settings = ai_settings(&state);
    if settings.api_key.is_empty() {
        return Ok(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "API key not configured",
        ));
    }

    // The intro prompt seeds the conversation but is not part of the
    // visible transcript afterwards.
    let intro = intro_prompt(topic.trim(), grade, difficulty)?;
    let seed = vec![ChatMessage::new(Role::User, &intro)];

    let resp = match complete(&seed, &settings.api_url, &settings.api_key, &settings.model).await {
        Ok(content) => {
            let reply = ChatMessage::new(Role::Assistant, &content);
            Json(public::TeachbackStartResponse {
                transcript: vec![public::ChatMessagePayload::from_message(&reply)],
                reply: content,
            })
            .into_response()
        }
        Err(e) => ai_error_response(e),
    };

    Ok(resp)
}

/// Answer the current question, or type "end" to finish with feedback.
async fn message_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::TeachbackMessageRequest>,
) -> Result<Response, crate::api::public::ApiError> {
    let topic = payload.topic.unwrap_or_default();
    if topic.trim().is_empty() {
        return Ok(error_response(StatusCode::BAD_REQUEST, "Topic is required"));
    }
    let message = payload.message.unwrap_or_default();
    if message.trim().is_empty() {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            "Message is required",
        ));
    }

    let mut transcript: Vec<ChatMessage> = Vec::new();
    for entry in payload.transcript.unwrap_or_default() {
        match entry.to_message() {
            Some(m) => transcript.push(m),
            None => {
                return Ok(error_response(
                    StatusCode::BAD_REQUEST,
                    &format!("Unknown message role: {}", entry.role),
                ));
            }
        }
    }

    let settings = ai_settings(&state);
    if settings.api_key.is_empty() {
        return Ok(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "API key not configured",
        ));
    }

    if is_end_message(&message) {
        // Feedback needs at least one answered question; refuse without
        // calling the AI otherwise.
        if answered_questions(&transcript) == 0 {
            let notice = ChatMessage::new(Role::Assistant, NEEDS_ANSWER_MESSAGE);
            transcript.push(notice);
            return Ok(Json(public::TeachbackMessageResponse {
                transcript: transcript
                    .iter()
                    .map(public::ChatMessagePayload::from_message)
                    .collect(),
                reply: NEEDS_ANSWER_MESSAGE.to_string(),
                ended: false,
                feedback: None,
            })
            .into_response());
        }

        let mut request = transcript.clone();
        request.push(ChatMessage::new(Role::User, &feedback_prompt(topic.trim())?));

        let resp = match complete(
            &request,
            &settings.api_url,
            &settings.api_key,
            &settings.model,
        )
        .await
        {
            Ok(content) => {
                // The feedback request itself stays out of the transcript.
                transcript.push(ChatMessage::new(Role::Assistant, &content));
                Json(public::TeachbackMessageResponse {
                    transcript: transcript
                        .iter()
                        .map(public::ChatMessagePayload::from_message)
                        .collect(),
                    reply: content.clone(),
                    ended: true,
                    feedback: Some(content),
                })
                .into_response()
            }
            Err(e) => ai_error_response(e),
        };
        return Ok(resp);
    }

    transcript.push(ChatMessage::new(Role::User, message.trim()));

    // The nudge keeps the model from commenting on the answer; it is sent
    // with the request but not persisted.
    let mut request = transcript.clone();
    request.push(next_question_nudge()?);

    let resp = match complete(
        &request,
        &settings.api_url,
        &settings.api_key,
        &settings.model,
    )
    .await
    {
        Ok(content) => {
            transcript.push(ChatMessage::new(Role::Assistant, &content));
            Json(public::TeachbackMessageResponse {
                transcript: transcript
                    .iter()
                    .map(public::ChatMessagePayload::from_message)
                    .collect(),
                reply: content,
                ended: false,
                feedback: None,
            })
            .into_response()
        }
        Err(e) => ai_error_response(e),
    };

    Ok(resp)
}

/// Create the teach-back router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/start", post(start_handler))
        .route("/message", post(message_handler))
}
