//! Public types for the calendar API
use serde::{Deserialize, Serialize};

use crate::calendar::EventRecord;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeTimeRequest {
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct FreeSlotPayload {
    pub start: String,
    pub end: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeSlotsResponse {
    pub free_slots: Vec<FreeSlotPayload>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequiredResponse {
    pub requires_auth: bool,
    pub auth_url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// A locally known event. The `date` is the canonical `YYYY-MM-DD` key,
/// never a timestamp.
#[derive(Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub id: String,
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub date: String,
}

impl From<EventRecord> for EventPayload {
    fn from(event: EventRecord) -> Self {
        Self {
            id: event.id,
            title: event.title,
            start_time: event.start_time,
            end_time: event.end_time,
            date: event.date.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct CreateEventResponse {
    pub success: bool,
    pub event: EventPayload,
}
