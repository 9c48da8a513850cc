//! Data model for the calendar view: locally created events and the free
//! slots reported by the backend.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A study-session event created during this session. Created only once
/// the backend acknowledges the creation request and never mutated
/// afterwards. Not persisted anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    /// Wall-clock start, `HH:MM`.
    pub start_time: String,
    /// Wall-clock end, `HH:MM`.
    pub end_time: String,
    /// Canonical date key for same-day comparisons.
    pub date: NaiveDate,
}

impl EventRecord {
    pub fn start_hour(&self) -> Option<u8> {
        hour_component(&self.start_time)
    }

    pub fn end_hour(&self) -> Option<u8> {
        hour_component(&self.end_time)
    }
}

/// A contiguous interval the backend reports as unscheduled, as a pair of
/// ISO-8601 timestamps. Replaced wholesale by every query response and
/// cleared on error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start: String,
    pub end: String,
}

impl FreeSlot {
    pub fn start_time(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.start)
    }

    pub fn end_time(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.end)
    }

    pub fn start_hour(&self) -> Option<u8> {
        self.start_time().map(|t| t.hour() as u8)
    }

    pub fn end_hour(&self) -> Option<u8> {
        self.end_time().map(|t| t.hour() as u8)
    }

    /// Display form of the start, e.g. `09:00`.
    pub fn display_start(&self) -> Option<String> {
        self.start_time().map(|t| t.format("%H:%M").to_string())
    }

    /// Display form of the end, e.g. `12:00`.
    pub fn display_end(&self) -> Option<String> {
        self.end_time().map(|t| t.format("%H:%M").to_string())
    }
}

/// Input for a free-time query. The email is a free-form identity the
/// backend uses to resolve which calendar to look at.
#[derive(Debug, Clone)]
pub struct FreeTimeQuery {
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    pub email: String,
}

/// Input for an event creation request, before it has been acknowledged
/// by the backend.
#[derive(Debug, Clone)]
pub struct EventCandidate {
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, or a full ISO timestamp which is passed through as-is.
    pub start_time: String,
    /// `HH:MM`, or a full ISO timestamp which is passed through as-is.
    pub end_time: String,
    pub title: String,
    pub description: String,
}

/// The three outcomes of a free-time query the backend can report.
/// Authorization-required is a distinct third state, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreeTimeOutcome {
    Slots(Vec<FreeSlot>),
    Failed(String),
    AuthRequired(String),
}

/// Truncated hour of an `HH:MM` string. The grid compares events by
/// starting hour only, so `09:30` occupies the `09:00` slot.
pub(crate) fn hour_component(time: &str) -> Option<u8> {
    let hour: u8 = time.split(':').next()?.trim().parse().ok()?;
    if hour < 24 { Some(hour) } else { None }
}

/// Lenient ISO-8601 parsing: the backend sometimes sends timestamps with
/// an offset, sometimes without. The wall-clock time is kept as written.
pub(crate) fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(t) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(t.naive_local());
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(t);
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").ok()
}
