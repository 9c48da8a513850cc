//! Router for the calendar API: proxies the free-time query and event
//! creation to the calendar backend.

use std::sync::{Arc, RwLock};

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Json, Response},
    routing::post,
};
use http::StatusCode;

use super::public;
use crate::api::public::MessageResponse;
use crate::api::state::AppState;
use crate::calendar::{
    CalendarError, EventCandidate, FreeTimeOutcome, FreeTimeQuery, create_event, find_free_time,
};

type SharedState = Arc<RwLock<AppState>>;

fn calendar_error_response(err: CalendarError) -> Response {
    (
        err.status_code(),
        Json(MessageResponse {
            message: err.to_string(),
        }),
    )
        .into_response()
}

/// Query the backend for free time slots in a date/time window.
async fn free_time_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::FreeTimeRequest>,
) -> Result<Response, crate::api::public::ApiError> {
    let base_url = {
        let shared_state = state.read().expect("Unable to read share state");
        shared_state.config.calendar_api_url.clone()
    };

    let query = FreeTimeQuery {
        date: payload.date.unwrap_or_default(),
        start_time: payload.start_time.unwrap_or_default(),
        end_time: payload.end_time.unwrap_or_default(),
        email: payload.email.unwrap_or_default(),
    };

    let resp = match find_free_time(&base_url, &query).await {
        Ok(FreeTimeOutcome::Slots(slots)) => Json(public::FreeSlotsResponse {
            free_slots: slots
                .into_iter()
                .map(|slot| public::FreeSlotPayload {
                    start: slot.start,
                    end: slot.end,
                })
                .collect(),
        })
        .into_response(),
        Ok(FreeTimeOutcome::AuthRequired(auth_url)) => Json(public::AuthRequiredResponse {
            requires_auth: true,
            auth_url,
        })
        .into_response(),
        Ok(FreeTimeOutcome::Failed(message)) => (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse { message }),
        )
            .into_response(),
        Err(err) => calendar_error_response(err),
    };

    Ok(resp)
}

/// Create a study-session event and return the locally minted record.
async fn create_event_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::CreateEventRequest>,
) -> Result<Response, crate::api::public::ApiError> {
    let base_url = {
        let shared_state = state.read().expect("Unable to read share state");
        shared_state.config.calendar_api_url.clone()
    };

    let candidate = EventCandidate {
        date: payload.date.unwrap_or_default(),
        start_time: payload.start_time.unwrap_or_default(),
        end_time: payload.end_time.unwrap_or_default(),
        title: payload.title.unwrap_or_default(),
        description: payload.description.unwrap_or_default(),
    };

    let resp = match create_event(&base_url, &candidate).await {
        Ok(event) => Json(public::CreateEventResponse {
            success: true,
            event: event.into(),
        })
        .into_response(),
        Err(err) => calendar_error_response(err),
    };

    Ok(resp)
}

/// Create the calendar router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/free", post(free_time_handler))
        .route("/event", post(create_event_handler))
}
