use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "hf_test_token";
pub const TEST_MODEL: &str = "test-org/test-model";
pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Mock inference server for streaming chat completions
pub struct InferenceMockServer {
    server: MockServer,
}

impl InferenceMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// Serve `fragments` as OpenAI-style content deltas, followed by `[DONE]`
    pub async fn mock_stream(&self, fragments: &[&str]) {
        let mut events: Vec<String> = vec![sse_event(&json!({
            "id": "chatcmpl-1",
            "object": "chat.completion.chunk",
            "choices": [{"index": 0, "delta": {"role": "assistant"}, "finish_reason": null}]
        }))];
        events.extend(fragments.iter().map(|fragment| content_event(fragment)));
        events.push(sse_event(&json!({
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "delta": {}, "finish_reason": "stop"}]
        })));
        events.push("data: [DONE]\n\n".to_string());

        self.mock_raw_stream(events.concat()).await;
    }

    /// Serve an arbitrary SSE body
    pub async fn mock_raw_stream(&self, body: String) {
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .and(header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
            .mount(&self.server)
            .await;
    }

    /// Mock a non-success answer
    pub async fn mock_status(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }
}

pub fn content_event(fragment: &str) -> String {
    sse_event(&json!({
        "id": "chatcmpl-1",
        "object": "chat.completion.chunk",
        "choices": [{"index": 0, "delta": {"content": fragment}, "finish_reason": null}]
    }))
}

pub fn sse_event(value: &serde_json::Value) -> String {
    format!("data: {}\n\n", value)
}
