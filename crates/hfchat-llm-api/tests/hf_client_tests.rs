mod fixtures;

use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;

use fixtures::{content_event, sse_event, InferenceMockServer, TEST_MODEL, TEST_TOKEN};
use hfchat_llm_api::{ApiError, ClientConfig, HfInferenceClient, LlmClient};
use hfchat_models::{GenerationParams, Message};

fn client_for(server: &InferenceMockServer) -> HfInferenceClient {
    HfInferenceClient::new(ClientConfig::new(TEST_TOKEN, TEST_MODEL).with_api_url(&server.uri()))
}

/// Drain the stream into (fragments, trailing error)
async fn collect(client: &HfInferenceClient, messages: &[Message]) -> (Vec<String>, Option<ApiError>) {
    let mut stream = client
        .chat_streaming(messages, &GenerationParams::default())
        .await
        .expect("stream should start");

    let mut fragments = Vec::new();
    while let Some(item) = stream.next().await {
        match item {
            Ok(chunk) => {
                if let Some(text) = chunk.content_delta() {
                    fragments.push(text.to_string());
                }
            }
            Err(e) => return (fragments, Some(e)),
        }
    }
    (fragments, None)
}

#[tokio::test]
async fn test_streams_fragments_in_order() {
    let server = InferenceMockServer::new().await;
    server.mock_stream(&["Hel", "lo there"]).await;

    let client = client_for(&server);
    let (fragments, error) = collect(&client, &[Message::user("Hi")]).await;

    assert!(error.is_none());
    assert_eq!(fragments, vec!["Hel".to_string(), "lo there".to_string()]);
}

#[tokio::test]
async fn test_request_body_carries_conversation_and_params() {
    let server = InferenceMockServer::new().await;
    server.mock_stream(&["ok"]).await;

    let client = client_for(&server);
    let messages = vec![Message::user("Hi"), Message::assistant("Hello"), Message::user("Again")];
    let params = GenerationParams::new(0.25, 0.5, 128).unwrap();
    let mut stream = client.chat_streaming(&messages, &params).await.unwrap();
    while stream.next().await.is_some() {}

    let requests = server.server().received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body,
        json!({
            "model": TEST_MODEL,
            "messages": [
                {"role": "user", "content": "Hi"},
                {"role": "assistant", "content": "Hello"},
                {"role": "user", "content": "Again"}
            ],
            "max_tokens": 128,
            "temperature": 0.25,
            "top_p": 0.5,
            "stream": true
        })
    );
}

#[tokio::test]
async fn test_stream_without_done_marker_ends_at_close() {
    let server = InferenceMockServer::new().await;
    server
        .mock_raw_stream(format!("{}{}", content_event("a"), content_event("b")))
        .await;

    let (fragments, error) = collect(&client_for(&server), &[Message::user("x")]).await;
    assert!(error.is_none());
    assert_eq!(fragments, vec!["a".to_string(), "b".to_string()]);
}

#[tokio::test]
async fn test_events_after_done_are_ignored() {
    let server = InferenceMockServer::new().await;
    server
        .mock_raw_stream(format!("{}data: [DONE]\n\n{}", content_event("kept"), content_event("dropped")))
        .await;

    let (fragments, _) = collect(&client_for(&server), &[Message::user("x")]).await;
    assert_eq!(fragments, vec!["kept".to_string()]);
}

#[tokio::test]
async fn test_empty_events_are_passed_through_without_content() {
    let server = InferenceMockServer::new().await;
    let body = [
        sse_event(&json!({"choices": []})),
        ": ping\n\n".to_string(),
        content_event("only"),
        sse_event(&json!({"choices": [{"delta": {"content": null}}]})),
        "data: [DONE]\n\n".to_string(),
    ]
    .concat();
    server.mock_raw_stream(body).await;

    let (fragments, error) = collect(&client_for(&server), &[Message::user("x")]).await;
    assert!(error.is_none());
    assert_eq!(fragments, vec!["only".to_string()]);
}

#[tokio::test]
async fn test_unauthorized_fails_before_streaming() {
    let server = InferenceMockServer::new().await;
    server.mock_status(401, r#"{"error":"Invalid credentials in Authorization header"}"#).await;

    let client = client_for(&server);
    let result = client.chat_streaming(&[Message::user("Hi")], &GenerationParams::default()).await;

    match result {
        Err(e @ ApiError::Status { .. }) => {
            assert!(e.is_auth_failure());
            assert!(e.to_string().contains("Invalid credentials"));
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("expected the request to fail"),
    }
}

#[tokio::test]
async fn test_rate_limit_status() {
    let server = InferenceMockServer::new().await;
    server.mock_status(429, "rate limit reached").await;

    let result = client_for(&server)
        .chat_streaming(&[Message::user("Hi")], &GenerationParams::default())
        .await;
    assert!(matches!(result, Err(ref e) if e.is_rate_limited()));
}

#[tokio::test]
async fn test_error_event_mid_stream() {
    let server = InferenceMockServer::new().await;
    let body = [
        content_event("Hel"),
        content_event("lo"),
        sse_event(&json!({"error": "Model too busy, unable to get response"})),
        content_event("never"),
    ]
    .concat();
    server.mock_raw_stream(body).await;

    let (fragments, error) = collect(&client_for(&server), &[Message::user("x")]).await;
    assert_eq!(fragments, vec!["Hel".to_string(), "lo".to_string()]);
    match error {
        Some(ApiError::Remote(message)) => assert!(message.contains("Model too busy")),
        other => panic!("expected a remote error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_object_without_message_mid_stream() {
    let server = InferenceMockServer::new().await;
    let body = [
        content_event("Hel"),
        sse_event(&json!({"error": {"code": 500, "type": "server_error"}})),
        content_event("never"),
        "data: [DONE]\n\n".to_string(),
    ]
    .concat();
    server.mock_raw_stream(body).await;

    let (fragments, error) = collect(&client_for(&server), &[Message::user("x")]).await;
    assert_eq!(fragments, vec!["Hel".to_string()]);
    match error {
        Some(ApiError::Remote(message)) => assert_eq!(message, "server_error"),
        other => panic!("expected a remote error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_usage_chunk_with_partial_counters_is_skipped() {
    let server = InferenceMockServer::new().await;
    let body = [
        content_event("Hello"),
        sse_event(&json!({"choices": [], "usage": {"prompt_tokens": 5, "completion_tokens": 3}})),
        "data: [DONE]\n\n".to_string(),
    ]
    .concat();
    server.mock_raw_stream(body).await;

    let (fragments, error) = collect(&client_for(&server), &[Message::user("x")]).await;
    assert!(error.is_none());
    assert_eq!(fragments, vec!["Hello".to_string()]);
}

#[tokio::test]
async fn test_malformed_event_is_an_error() {
    let server = InferenceMockServer::new().await;
    server
        .mock_raw_stream(format!("{}data: {{not json\n\n", content_event("ok")))
        .await;

    let (fragments, error) = collect(&client_for(&server), &[Message::user("x")]).await;
    assert_eq!(fragments, vec!["ok".to_string()]);
    assert!(matches!(error, Some(ApiError::Decode { .. })));
}

#[tokio::test]
async fn test_connection_refused_is_request_error() {
    // Nothing listens on port 9 (discard) in the test environment
    let client = HfInferenceClient::new(ClientConfig::new(TEST_TOKEN, TEST_MODEL).with_api_url("http://127.0.0.1:9"));
    let result = client.chat_streaming(&[Message::user("Hi")], &GenerationParams::default()).await;
    assert!(matches!(result, Err(ApiError::Request(_))));
}
