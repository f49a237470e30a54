//! Mock Telegram API Server for testing
//!
//! This module provides a mock HTTP server that simulates the Telegram Bot API
//! for testing purposes. It uses wiremock to create configurable mock responses.

use serde_json::{json, Value};
use teloxide::Bot;
use wiremock::{
    matchers::{method, path_regex},
    Mock, MockServer, ResponseTemplate,
};

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub success: bool,
    pub custom_response: Option<Value>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            success: true,
            custom_response: None,
        }
    }
}

impl MockResponseConfig {
    pub fn failing() -> Self {
        Self {
            success: false,
            custom_response: None,
        }
    }
}

fn message_result(edited: bool) -> Value {
    let mut message = json!({
        "message_id": 123,
        "from": {
            "id": 12345,
            "is_bot": true,
            "first_name": "TestBot",
            "username": "test_bot"
        },
        "chat": {
            "id": test_user_id(),
            "first_name": "Ada",
            "type": "private"
        },
        "date": 1640995200,
        "text": "Test message"
    });
    if edited {
        message["edit_date"] = json!(1640995260);
    }
    message
}

impl TelegramMockServer {
    /// Create a new mock Telegram API server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Bot whose requests go to this server
    pub fn bot(&self) -> Bot {
        let api_url = url::Url::parse(&self.server.uri()).expect("mock server uri");
        Bot::new(test_bot_token()).set_api_url(api_url)
    }

    async fn mount(&self, endpoint: &str, config: MockResponseConfig, ok_result: Value, error: &str) {
        let body = config.custom_response.unwrap_or_else(|| {
            if config.success {
                json!({ "ok": true, "result": ok_result })
            } else {
                json!({ "ok": false, "error_code": 400, "description": error })
            }
        });

        Mock::given(method("POST"))
            .and(path_regex(format!("(?i)^/bot{}/{}$", regex::escape(&test_bot_token()), endpoint)))
            .respond_with(ResponseTemplate::new(if config.success { 200 } else { 400 }).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for sendMessage endpoint
    pub async fn mock_send_message(&self, config: MockResponseConfig) {
        self.mount("sendMessage", config, message_result(false), "Bad Request: message text is empty")
            .await;
    }

    /// Setup mock for editMessageText endpoint
    pub async fn mock_edit_message_text(&self, config: MockResponseConfig) {
        self.mount("editMessageText", config, message_result(true), "Bad Request: message not found")
            .await;
    }

    /// Setup mock for answerCallbackQuery endpoint
    pub async fn mock_answer_callback_query(&self, config: MockResponseConfig) {
        self.mount("answerCallbackQuery", config, json!(true), "Bad Request: query is too old")
            .await;
    }

    /// Setup all common mocks with default success responses
    pub async fn setup_default_mocks(&self) {
        let config = MockResponseConfig::default();

        self.mock_send_message(config.clone()).await;
        self.mock_edit_message_text(config.clone()).await;
        self.mock_answer_callback_query(config).await;
    }

    /// JSON bodies of the requests received for `endpoint`, in order
    pub async fn requests_to(&self, endpoint: &str) -> Vec<Value> {
        let received_requests = self.server.received_requests().await.unwrap_or_default();
        received_requests
            .iter()
            .filter(|req| req.url.path().to_ascii_lowercase().ends_with(&endpoint.to_ascii_lowercase()))
            .map(|req| serde_json::from_slice(&req.body).unwrap_or(Value::Null))
            .collect()
    }

    /// Verify that a specific endpoint was called
    pub async fn verify_endpoint_called(&self, endpoint: &str, times: usize) {
        let matching_requests = self.requests_to(endpoint).await.len();

        assert_eq!(
            matching_requests, times,
            "Expected {} calls to {}, but got {}",
            times, endpoint, matching_requests
        );
    }
}

/// Helper function to create a test bot token
pub fn test_bot_token() -> String {
    "12345:test_token".to_string()
}

/// Helper function to create test user ID
pub fn test_user_id() -> i64 {
    987654321
}
