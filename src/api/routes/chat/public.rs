//! Public types for the chat API
use serde::{Deserialize, Serialize};

use crate::anthropic::{ChatMessage, Role};

#[derive(Deserialize)]
pub struct ChatRequest {
    pub messages: Option<Vec<ChatMessagePayload>>,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct ChatMessagePayload {
    pub role: String,
    pub content: String,
}

impl ChatMessagePayload {
    /// `None` for roles the AI API doesn't know about.
    pub fn to_message(&self) -> Option<ChatMessage> {
        let role = match self.role.trim().to_lowercase().as_str() {
            "system" => Role::System,
            "assistant" => Role::Assistant,
            "user" => Role::User,
            _ => return None,
        };
        Some(ChatMessage::new(role, &self.content))
    }

    pub fn from_message(message: &ChatMessage) -> Self {
        let role = match message.role {
            Role::System => "system",
            Role::Assistant => "assistant",
            Role::User => "user",
        };
        Self {
            role: role.to_string(),
            content: message.content.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub content: String,
}
