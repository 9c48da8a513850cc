//! Integration tests for the flashcards API endpoint

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use serial_test::serial;

    use crate::test_utils::{post_json, test_app, test_config};

    /// Tests flashcards require study material
    #[tokio::test]
    #[serial]
    async fn it_requires_material() {
        let app = test_app(test_config());

        let (status, body) = post_json(app, "/api/flashcards", json!({})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Material is required");
    }

    /// Tests an explicit count of zero is rejected
    #[tokio::test]
    #[serial]
    async fn it_rejects_a_zero_count() {
        let app = test_app(test_config());

        let (status, body) = post_json(
            app,
            "/api/flashcards",
            json!({"material": "Cells are the unit of life.", "count": 0}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Flashcard count must be at least 1");
    }

    /// Tests model output is parsed into question/answer cards
    #[tokio::test]
    #[serial]
    async fn it_generates_cards_from_model_output() {
        let mut server = mockito::Server::new_async().await;
        let output = "Q: What is osmosis?\nA: Diffusion of water across a membrane.\n\nQ: What drives it?\nA: The concentration gradient.";
        let mock = server
            .mock("POST", "/v1/messages")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"content": [{"type": "text", "text": output}]}).to_string(),
            )
            .create();

        let mut config = test_config();
        config.anthropic_api_url = server.url();
        let app = test_app(config);

        let (status, body) = post_json(
            app,
            "/api/flashcards",
            json!({"material": "Osmosis is the diffusion of water.", "subject": "Biology", "count": 2}),
        )
        .await;

        mock.assert();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        let cards = body["cards"].as_array().unwrap();
        assert_eq!(cards[0]["question"], "What is osmosis?");
        assert_eq!(cards[1]["answer"], "The concentration gradient.");
    }

    /// Tests cardless model output is a gateway error, not an empty deck
    #[tokio::test]
    #[serial]
    async fn it_rejects_cardless_output() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/messages")
            .with_status(200)
            .with_body(r#"{"content": [{"type": "text", "text": "I can't make cards from this."}]}"#)
            .create();

        let mut config = test_config();
        config.anthropic_api_url = server.url();
        let app = test_app(config);

        let (status, body) = post_json(
            app,
            "/api/flashcards",
            json!({"material": "Osmosis is the diffusion of water."}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Unexpected response format from AI");
    }
}
