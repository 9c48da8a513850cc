//! Client for the Anthropic messages API. Non-streaming: the study tools
//! render whole responses, so a single request/response exchange is all
//! that is needed.

use std::time::Duration;

use anyhow::{Error, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;
const TEMPERATURE: f32 = 0.7;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: &str) -> Self {
        Self {
            role,
            content: content.to_string(),
        }
    }
}

/// Runs one completion over the transcript and returns the assistant's
/// text. System messages are lifted into the API's dedicated `system`
/// field; the remaining turns are forwarded in order.
pub async fn complete(
    messages: &[ChatMessage],
    api_hostname: &str,
    api_key: &str,
    model: &str,
) -> Result<String, Error> {
    let system = messages
        .iter()
        .filter(|m| m.role == Role::System)
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    let turns: Vec<&ChatMessage> = messages.iter().filter(|m| m.role != Role::System).collect();

    let payload = json!({
        "model": model,
        "max_tokens": MAX_TOKENS,
        "temperature": TEMPERATURE,
        "system": system,
        "messages": turns,
    });

    let url = format!("{}/v1/messages", api_hostname.trim_end_matches('/'));
    let response = reqwest::Client::new()
        .post(url)
        .header("x-api-key", api_key)
        .header("anthropic-version", ANTHROPIC_VERSION)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(60 * 10))
        .json(&payload)
        .send()
        .await?;

    let status = response.status();
    let body: Value = response.json().await?;

    if !status.is_success() {
        bail!("AI request failed ({}): {}", status, body);
    }

    body["content"][0]["text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("Unexpected response format from AI: {}", body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), r#""system""#);
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            r#""assistant""#
        );
    }

    #[test]
    fn test_message_serialization() {
        let msg = ChatMessage::new(Role::User, "Hello");
        assert_eq!(
            serde_json::to_string(&msg).unwrap(),
            r#"{"role":"user","content":"Hello"}"#
        );
    }

    #[tokio::test]
    async fn test_complete_returns_first_content_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"content": [{"type": "text", "text": "Hello there!"}]}"#)
            .create();

        let messages = vec![ChatMessage::new(Role::User, "Hi")];
        let result = complete(&messages, &server.url(), "test-key", "claude-test").await;

        mock.assert();
        assert_eq!(result.unwrap(), "Hello there!");
    }

    #[tokio::test]
    async fn test_complete_surfaces_api_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/messages")
            .with_status(529)
            .with_body(r#"{"error": {"type": "overloaded_error"}}"#)
            .create();

        let messages = vec![ChatMessage::new(Role::User, "Hi")];
        let result = complete(&messages, &server.url(), "test-key", "claude-test").await;

        let err = result.unwrap_err().to_string();
        assert!(err.contains("529"), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn test_complete_rejects_unexpected_shapes() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/messages")
            .with_status(200)
            .with_body(r#"{"content": []}"#)
            .create();

        let messages = vec![ChatMessage::new(Role::User, "Hi")];
        let result = complete(&messages, &server.url(), "test-key", "claude-test").await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_system_messages_are_lifted_out_of_the_turn_list() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_body(mockito::Matcher::PartialJson(json!({
                "system": "Be terse.",
                "messages": [{"role": "user", "content": "Hi"}],
            })))
            .with_status(200)
            .with_body(r#"{"content": [{"type": "text", "text": "ok"}]}"#)
            .create();

        let messages = vec![
            ChatMessage::new(Role::System, "Be terse."),
            ChatMessage::new(Role::User, "Hi"),
        ];
        complete(&messages, &server.url(), "test-key", "claude-test")
            .await
            .unwrap();

        mock.assert();
    }
}
