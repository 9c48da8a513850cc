//! Public types for the schedule API: the hourly grid for one day with
//! each slot classified against events and reported free time.

use serde::{Deserialize, Serialize};

use crate::schedule::SlotStatus;

pub use crate::api::routes::calendar::public::EventPayload;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleGridRequest {
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    pub start_hour: Option<u8>,
    pub end_hour: Option<u8>,
    pub email: Option<String>,
    /// Locally created events to reconcile against the grid.
    #[serde(default)]
    pub events: Vec<EventPayload>,
}

/// A free interval in display form, e.g. `09:00` to `12:00`.
#[derive(Serialize)]
pub struct FreeSlotDisplay {
    pub start: String,
    pub end: String,
}

#[derive(Serialize)]
pub struct SlotRow {
    pub hour: u8,
    /// Display form, e.g. `09:00`.
    pub label: String,
    pub status: SlotStatus,
    /// Creation modal prefill; present only on bookable slots.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefill: Option<FreeSlotDisplay>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleGridResponse {
    pub date: String,
    pub slots: Vec<SlotRow>,
    pub free_slots: Vec<FreeSlotDisplay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
