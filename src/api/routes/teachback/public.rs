//! Public types for the teach-back API. The server is stateless: every
//! request carries the visible transcript and the response returns the
//! updated one.

use serde::{Deserialize, Serialize};

pub use crate::api::routes::chat::public::ChatMessagePayload;

#[derive(Deserialize)]
pub struct TeachbackStartRequest {
    pub topic: Option<String>,
    /// 1-12, or 13 for university. Defaults to 1.
    pub grade: Option<u8>,
    /// "easy", "normal" or "difficult". Defaults to "normal".
    pub difficulty: Option<String>,
}

#[derive(Serialize)]
pub struct TeachbackStartResponse {
    pub transcript: Vec<ChatMessagePayload>,
    pub reply: String,
}

#[derive(Deserialize)]
pub struct TeachbackMessageRequest {
    pub topic: Option<String>,
    pub transcript: Option<Vec<ChatMessagePayload>>,
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct TeachbackMessageResponse {
    pub transcript: Vec<ChatMessagePayload>,
    pub reply: String,
    pub ended: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}
