use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub calendar_api_url: String,
    pub anthropic_api_url: String,
    pub anthropic_api_key: String,
    pub anthropic_model: String,
    pub web_ui_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let calendar_api_url = env::var("STUDYTOOLS_CALENDAR_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());
        let anthropic_api_url = env::var("STUDYTOOLS_ANTHROPIC_API_URL")
            .unwrap_or_else(|_| "https://api.anthropic.com".to_string());
        // The only AI credential. Left empty when unset so the server can
        // still boot; chat requests report the missing key instead.
        let anthropic_api_key = env::var("ANTHROPIC_API_KEY").unwrap_or_else(|_| String::new());
        let anthropic_model = env::var("STUDYTOOLS_ANTHROPIC_MODEL")
            .unwrap_or_else(|_| "claude-3-5-sonnet-latest".to_string());
        let web_ui_path =
            env::var("STUDYTOOLS_WEB_UI_PATH").unwrap_or_else(|_| "./web-ui".to_string());

        Self {
            calendar_api_url,
            anthropic_api_url,
            anthropic_api_key,
            anthropic_model,
            web_ui_path,
        }
    }
}
