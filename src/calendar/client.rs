//! HTTP client for the calendar free-busy backend.

use std::time::Duration;

use http::StatusCode;
use serde_json::{Value, json};
use thiserror::Error;
use uuid::Uuid;

use crate::calendar::types::{
    EventCandidate, EventRecord, FreeSlot, FreeTimeOutcome, FreeTimeQuery, parse_timestamp,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_EVENT_TITLE: &str = "Revision Event";

#[derive(Debug, Error)]
pub enum CalendarError {
    /// A required field is missing. No request is made.
    #[error("{0}")]
    Validation(String),
    /// The backend could not be reached or the exchange failed outright.
    #[error("Failed to reach the calendar service: {0}")]
    Transport(String),
    /// The response body did not match any expected shape.
    #[error("Unexpected calendar service response: {0}")]
    Format(String),
    /// The backend reported a failure of its own, surfaced verbatim.
    #[error("{0}")]
    Backend(String),
}

impl CalendarError {
    /// The HTTP status the API layer responds with for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CalendarError::Validation(_) | CalendarError::Backend(_) => StatusCode::BAD_REQUEST,
            CalendarError::Transport(_) | CalendarError::Format(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Ask the backend for free time on `query.date` between the given
/// bounds, on the calendar resolved from `query.email`.
pub async fn find_free_time(
    api_base_url: &str,
    query: &FreeTimeQuery,
) -> Result<FreeTimeOutcome, CalendarError> {
    validate_query(query)?;

    let url = format!("{}/calendar/free", api_base_url.trim_end_matches('/'));
    let payload = json!({
        "date": query.date,
        "start_time": query.start_time,
        "end_time": query.end_time,
        "email": query.email,
        "constraints": [],
    });

    tracing::debug!("Querying free time for {} on {}", query.email, query.date);

    let response = reqwest::Client::new()
        .post(url)
        .header("Content-Type", "application/json")
        .timeout(REQUEST_TIMEOUT)
        .json(&payload)
        .send()
        .await
        .map_err(|e| CalendarError::Transport(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| CalendarError::Transport(e.to_string()))?;

    interpret_free_time_body(status, &body)
}

/// Ask the backend to persist a study-session event. On acknowledgment
/// the local record is minted here, id included; the backend does not
/// return one.
pub async fn create_event(
    api_base_url: &str,
    candidate: &EventCandidate,
) -> Result<EventRecord, CalendarError> {
    let date = validate_candidate(candidate)?;

    let start = full_timestamp(&candidate.date, &candidate.start_time);
    let end = full_timestamp(&candidate.date, &candidate.end_time);
    let title = if candidate.title.trim().is_empty() {
        DEFAULT_EVENT_TITLE.to_string()
    } else {
        candidate.title.clone()
    };

    let url = format!("{}/calendar/event", api_base_url.trim_end_matches('/'));
    let payload = json!({
        "start": start,
        "end": end,
        "summary": title,
        "description": candidate.description,
    });

    let response = reqwest::Client::new()
        .post(url)
        .header("Content-Type", "application/json")
        .timeout(REQUEST_TIMEOUT)
        .json(&payload)
        .send()
        .await
        .map_err(|e| CalendarError::Transport(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| CalendarError::Transport(e.to_string()))?;

    interpret_create_body(status, &body)?;

    Ok(EventRecord {
        id: Uuid::new_v4().to_string(),
        title,
        start_time: display_time(&start, &candidate.start_time),
        end_time: display_time(&end, &candidate.end_time),
        date,
    })
}

fn validate_query(query: &FreeTimeQuery) -> Result<(), CalendarError> {
    if query.date.trim().is_empty()
        || query.start_time.trim().is_empty()
        || query.end_time.trim().is_empty()
    {
        return Err(CalendarError::Validation(
            "Missing required fields: date, startTime, endTime".to_string(),
        ));
    }
    if query.email.trim().is_empty() {
        return Err(CalendarError::Validation(
            "Missing required field: email".to_string(),
        ));
    }
    Ok(())
}

fn validate_candidate(candidate: &EventCandidate) -> Result<chrono::NaiveDate, CalendarError> {
    if candidate.date.trim().is_empty()
        || candidate.start_time.trim().is_empty()
        || candidate.end_time.trim().is_empty()
    {
        return Err(CalendarError::Validation(
            "Missing required fields: date, startTime, endTime".to_string(),
        ));
    }
    chrono::NaiveDate::parse_from_str(candidate.date.trim(), "%Y-%m-%d")
        .map_err(|_| CalendarError::Validation(format!("Invalid date: {}", candidate.date)))
}

// Bare `HH:MM` times are promoted to a full timestamp on the candidate's
// date; anything already carrying a date part passes through untouched.
fn full_timestamp(date: &str, time: &str) -> String {
    if !time.contains('T') && time.contains(':') {
        format!("{}T{}:00", date.trim(), time.trim())
    } else {
        time.trim().to_string()
    }
}

fn display_time(timestamp: &str, fallback: &str) -> String {
    parse_timestamp(timestamp)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| fallback.to_string())
}

// Some deployments of the backend double-encode the payload as a JSON
// string containing JSON; unwrap that before interpreting it.
fn parse_body(body: &str) -> Result<Value, CalendarError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| CalendarError::Format(e.to_string()))?;
    if let Value::String(inner) = &value {
        return serde_json::from_str(inner).map_err(|e| CalendarError::Format(e.to_string()));
    }
    Ok(value)
}

fn interpret_free_time_body(
    status: StatusCode,
    body: &str,
) -> Result<FreeTimeOutcome, CalendarError> {
    let value = parse_body(body)?;

    if value["requires_auth"].as_bool() == Some(true) {
        let url = value["auth_url"].as_str().ok_or_else(|| {
            CalendarError::Format("requires_auth response without an auth_url".to_string())
        })?;
        return Ok(FreeTimeOutcome::AuthRequired(url.to_string()));
    }

    match value["success"].as_bool() {
        Some(true) => {
            let slots = value["free_slots"].as_array().ok_or_else(|| {
                CalendarError::Format("free_slots is not an array".to_string())
            })?;
            let slots = slots
                .iter()
                .filter_map(|slot| match (slot["start"].as_str(), slot["end"].as_str()) {
                    (Some(start), Some(end)) => Some(FreeSlot {
                        start: start.to_string(),
                        end: end.to_string(),
                    }),
                    _ => None,
                })
                .collect();
            Ok(FreeTimeOutcome::Slots(slots))
        }
        Some(false) => {
            let message = value["error"]
                .as_str()
                .unwrap_or("Failed to fetch free time slots")
                .to_string();
            Ok(FreeTimeOutcome::Failed(message))
        }
        None if !status.is_success() => Err(CalendarError::Transport(detail_or_status(
            &value, status,
        ))),
        None => Err(CalendarError::Format(
            "response is missing the success field".to_string(),
        )),
    }
}

fn interpret_create_body(status: StatusCode, body: &str) -> Result<(), CalendarError> {
    let value = parse_body(body)?;

    match value["success"].as_bool() {
        Some(true) => Ok(()),
        Some(false) => Err(CalendarError::Backend(
            value["error"]
                .as_str()
                .unwrap_or("Failed to create event")
                .to_string(),
        )),
        None if !status.is_success() => match value["detail"].as_str() {
            Some(detail) => Err(CalendarError::Backend(detail.to_string())),
            None => Err(CalendarError::Transport(detail_or_status(&value, status))),
        },
        None => Err(CalendarError::Format(
            "response is missing the success field".to_string(),
        )),
    }
}

fn detail_or_status(value: &Value, status: StatusCode) -> String {
    value["detail"]
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| format!("calendar service returned {}", status))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> FreeTimeQuery {
        FreeTimeQuery {
            date: "2024-01-01".to_string(),
            start_time: "09:00".to_string(),
            end_time: "20:00".to_string(),
            email: "student@example.com".to_string(),
        }
    }

    fn candidate() -> EventCandidate {
        EventCandidate {
            date: "2024-01-01".to_string(),
            start_time: "09:00".to_string(),
            end_time: "12:00".to_string(),
            title: "Maths revision".to_string(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_missing_email_fails_without_network_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/calendar/free").expect(0).create();

        let mut q = query();
        q.email = String::new();
        let result = find_free_time(&server.url(), &q).await;

        mock.assert();
        assert!(matches!(result, Err(CalendarError::Validation(_))));
    }

    #[tokio::test]
    async fn test_missing_date_fails_without_network_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/calendar/free").expect(0).create();

        let mut q = query();
        q.date = String::new();
        let result = find_free_time(&server.url(), &q).await;

        mock.assert();
        assert!(matches!(result, Err(CalendarError::Validation(_))));
    }

    #[tokio::test]
    async fn test_successful_query_returns_slots() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/calendar/free")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"success": true, "date": "2024-01-01", "free_slots": [
                    {"start": "2024-01-01T09:00:00", "end": "2024-01-01T12:00:00"}
                ]}"#,
            )
            .create();

        let outcome = find_free_time(&server.url(), &query()).await.unwrap();

        mock.assert();
        match outcome {
            FreeTimeOutcome::Slots(slots) => {
                assert_eq!(slots.len(), 1);
                assert_eq!(slots[0].display_start().unwrap(), "09:00");
            }
            other => panic!("Expected slots, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_double_encoded_body_is_unwrapped() {
        let mut server = mockito::Server::new_async().await;
        let inner = r#"{"success": true, "free_slots": [{"start": "2024-01-01T09:00:00", "end": "2024-01-01T12:00:00"}]}"#;
        let mock = server
            .mock("POST", "/calendar/free")
            .with_status(200)
            .with_body(serde_json::to_string(&inner).unwrap())
            .create();

        let outcome = find_free_time(&server.url(), &query()).await.unwrap();

        mock.assert();
        assert!(matches!(outcome, FreeTimeOutcome::Slots(slots) if slots.len() == 1));
    }

    #[tokio::test]
    async fn test_backend_failure_is_surfaced_verbatim() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/calendar/free")
            .with_status(200)
            .with_body(r#"{"success": false, "error": "Missing calendar credentials", "free_slots": []}"#)
            .create();

        let outcome = find_free_time(&server.url(), &query()).await.unwrap();

        assert_eq!(
            outcome,
            FreeTimeOutcome::Failed("Missing calendar credentials".to_string())
        );
    }

    #[tokio::test]
    async fn test_requires_auth_is_a_distinct_outcome() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/calendar/free")
            .with_status(200)
            .with_body(r#"{"requires_auth": true, "auth_url": "https://accounts.example.com/auth"}"#)
            .create();

        let outcome = find_free_time(&server.url(), &query()).await.unwrap();

        assert_eq!(
            outcome,
            FreeTimeOutcome::AuthRequired("https://accounts.example.com/auth".to_string())
        );
    }

    #[tokio::test]
    async fn test_non_array_free_slots_is_a_format_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/calendar/free")
            .with_status(200)
            .with_body(r#"{"success": true, "free_slots": "none"}"#)
            .create();

        let result = find_free_time(&server.url(), &query()).await;

        assert!(matches!(result, Err(CalendarError::Format(_))));
    }

    #[tokio::test]
    async fn test_non_json_body_is_a_format_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/calendar/free")
            .with_status(200)
            .with_body("<html>proxy error</html>")
            .create();

        let result = find_free_time(&server.url(), &query()).await;

        assert!(matches!(result, Err(CalendarError::Format(_))));
    }

    #[tokio::test]
    async fn test_entries_missing_bounds_are_skipped() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/calendar/free")
            .with_status(200)
            .with_body(
                r#"{"success": true, "free_slots": [
                    {"start": "2024-01-01T09:00:00"},
                    {"start": "2024-01-01T13:00:00", "end": "2024-01-01T14:00:00"}
                ]}"#,
            )
            .create();

        let outcome = find_free_time(&server.url(), &query()).await.unwrap();

        assert!(matches!(outcome, FreeTimeOutcome::Slots(slots) if slots.len() == 1));
    }

    #[tokio::test]
    async fn test_create_event_mints_local_record() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/calendar/event")
            .with_status(200)
            .with_body(r#"{"success": true, "status": "Created successfully"}"#)
            .create();

        let event = create_event(&server.url(), &candidate()).await.unwrap();

        mock.assert();
        assert!(!event.id.is_empty());
        assert_eq!(event.title, "Maths revision");
        assert_eq!(event.start_time, "09:00");
        assert_eq!(event.end_time, "12:00");
        assert_eq!(event.date.to_string(), "2024-01-01");
    }

    #[tokio::test]
    async fn test_create_event_defaults_title() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/calendar/event")
            .with_status(200)
            .with_body(r#"{"success": true}"#)
            .create();

        let mut c = candidate();
        c.title = String::new();
        let event = create_event(&server.url(), &c).await.unwrap();

        assert_eq!(event.title, DEFAULT_EVENT_TITLE);
    }

    #[tokio::test]
    async fn test_create_event_missing_time_fails_without_network_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/calendar/event").expect(0).create();

        let mut c = candidate();
        c.end_time = String::new();
        let result = create_event(&server.url(), &c).await;

        mock.assert();
        assert!(matches!(result, Err(CalendarError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_event_backend_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/calendar/event")
            .with_status(200)
            .with_body(r#"{"success": false, "error": "Calendar is read-only"}"#)
            .create();

        let result = create_event(&server.url(), &candidate()).await;

        match result {
            Err(CalendarError::Backend(message)) => assert_eq!(message, "Calendar is read-only"),
            other => panic!("Expected backend error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_event_http_error_with_detail() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/calendar/event")
            .with_status(400)
            .with_body(r#"{"detail": "End must be after start"}"#)
            .create();

        let result = create_event(&server.url(), &candidate()).await;

        match result {
            Err(CalendarError::Backend(message)) => assert_eq!(message, "End must be after start"),
            other => panic!("Expected backend error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_event_missing_ack_is_a_format_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/calendar/event")
            .with_status(200)
            .with_body(r#"{"status": "maybe"}"#)
            .create();

        let result = create_event(&server.url(), &candidate()).await;

        assert!(matches!(result, Err(CalendarError::Format(_))));
    }

    #[test]
    fn test_full_timestamp_promotion() {
        assert_eq!(
            full_timestamp("2024-01-01", "09:00"),
            "2024-01-01T09:00:00"
        );
        assert_eq!(
            full_timestamp("2024-01-01", "2024-01-02T09:00:00"),
            "2024-01-02T09:00:00"
        );
    }
}
