//! Router for the schedule API: queries free time for a day and
//! reconciles it with locally created events into classified slot rows.

use std::sync::{Arc, RwLock};

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Json, Response},
    routing::post,
};
use chrono::NaiveDate;
use http::StatusCode;
use uuid::Uuid;

use super::public;
use crate::api::public::MessageResponse;
use crate::api::state::AppState;
use crate::calendar::{EventRecord, FreeTimeQuery, find_free_time};
use crate::schedule::{SchedulePlanner, TimeWindow, booking_prefill};

type SharedState = Arc<RwLock<AppState>>;

fn message_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(MessageResponse {
            message: message.to_string(),
        }),
    )
        .into_response()
}

fn parse_event(payload: public::EventPayload) -> Option<EventRecord> {
    let date = NaiveDate::parse_from_str(payload.date.trim(), "%Y-%m-%d").ok()?;
    let id = if payload.id.trim().is_empty() {
        Uuid::new_v4().to_string()
    } else {
        payload.id
    };
    Some(EventRecord {
        id,
        title: payload.title,
        start_time: payload.start_time,
        end_time: payload.end_time,
        date,
    })
}

/// Build the classified grid for one day.
async fn grid_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::ScheduleGridRequest>,
) -> Result<Response, crate::api::public::ApiError> {
    let (Some(date), Some(start_hour), Some(end_hour)) =
        (payload.date, payload.start_hour, payload.end_hour)
    else {
        return Ok(message_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields: date, startHour, endHour",
        ));
    };
    let Ok(date) = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") else {
        return Ok(message_response(
            StatusCode::BAD_REQUEST,
            "Date must be in YYYY-MM-DD format",
        ));
    };

    // start == end is the legal empty window; a reversed or out-of-range
    // window is rejected.
    let window = if start_hour == end_hour && end_hour <= 24 {
        None
    } else {
        match TimeWindow::new(start_hour, end_hour) {
            Some(window) => Some(window),
            None => {
                return Ok(message_response(
                    StatusCode::BAD_REQUEST,
                    "Invalid time window: start hour must be before end hour",
                ));
            }
        }
    };

    let base_url = {
        let shared_state = state.read().expect("Unable to read share state");
        shared_state.config.calendar_api_url.clone()
    };

    let mut planner = SchedulePlanner::new(date);
    for event in payload.events {
        match parse_event(event) {
            Some(event) => planner.apply_event_created(event),
            None => {
                return Ok(message_response(
                    StatusCode::BAD_REQUEST,
                    "Event dates must be in YYYY-MM-DD format",
                ));
            }
        }
    }

    let query = FreeTimeQuery {
        date: date.format("%Y-%m-%d").to_string(),
        start_time: format!("{:02}:00", start_hour),
        end_time: format!("{:02}:00", end_hour),
        email: payload.email.unwrap_or_default(),
    };

    let token = planner.begin_query();
    match find_free_time(&base_url, &query).await {
        Ok(outcome) => {
            planner.apply_outcome(token, outcome);
        }
        Err(err) => {
            return Ok(message_response(err.status_code(), &err.to_string()));
        }
    }

    let day_events: Vec<EventRecord> = planner
        .events_for_selected_date()
        .into_iter()
        .cloned()
        .collect();

    let slots = planner
        .grid(window)
        .into_iter()
        .map(|(slot, status)| public::SlotRow {
            hour: slot.hour(),
            label: slot.label(),
            status,
            prefill: booking_prefill(slot, &day_events, planner.free_slots()).map(
                |(start, end)| public::FreeSlotDisplay { start, end },
            ),
        })
        .collect();

    let free_slots = planner
        .free_slots()
        .iter()
        .filter_map(|slot| {
            Some(public::FreeSlotDisplay {
                start: slot.display_start()?,
                end: slot.display_end()?,
            })
        })
        .collect();

    Ok(Json(public::ScheduleGridResponse {
        date: date.format("%Y-%m-%d").to_string(),
        slots,
        free_slots,
        auth_url: planner.auth_url().map(str::to_string),
        error: planner.last_error().map(str::to_string),
    })
    .into_response())
}

/// Create the schedule router
pub fn router() -> Router<SharedState> {
    Router::new().route("/grid", post(grid_handler))
}
