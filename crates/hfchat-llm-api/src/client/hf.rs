use async_stream::stream;
use async_trait::async_trait;
use futures::StreamExt;

use hfchat_logging::{log_request, log_response, log_stream_chunk};
use hfchat_models::{ChatCompletionRequest, GenerationParams, Message, StreamChunk, StreamError};

use crate::client::{ChunkStream, LlmClient};
use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::sse::{SseDecoder, DONE_MARKER};

/// Streaming client for the Hugging Face router and other OpenAI-compatible servers
pub struct HfInferenceClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl HfInferenceClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }
}

#[async_trait]
impl LlmClient for HfInferenceClient {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn chat_streaming(&self, messages: &[Message], params: &GenerationParams) -> Result<ChunkStream> {
        let request = ChatCompletionRequest::streaming(&self.config.model, messages, params);
        let verbose = self.config.verbose;

        log_request(&self.config.api_url, &request, &self.config.api_token, verbose);
        log::debug!(
            "POST {} model={} messages={} max_tokens={} temperature={} top_p={}",
            self.config.api_url,
            request.model,
            request.messages.len(),
            request.max_tokens,
            request.temperature,
            request.top_p
        );

        let response = self.client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_token)
            .header("Content-Type", "application/json")
            .header("Accept", "text/event-stream")
            .json(&request)
            .send()
            .await
            .map_err(ApiError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read error body".to_string());
            log_response(&status, &headers, &body, verbose);
            log::warn!("inference service answered {}", status);
            return Err(ApiError::Status { status: status.as_u16(), body });
        }

        let mut byte_stream = response.bytes_stream();

        let events = stream! {
            let mut decoder = SseDecoder::new();
            let mut chunk_counter = 0usize;

            'read: loop {
                let payloads = match byte_stream.next().await {
                    Some(Ok(bytes)) => decoder.push(&bytes),
                    Some(Err(e)) => {
                        yield Err(ApiError::Stream(e));
                        break 'read;
                    }
                    None => {
                        let rest: Vec<String> = decoder.finish().into_iter().collect();
                        for data in rest {
                            chunk_counter += 1;
                            log_stream_chunk(chunk_counter, &data, verbose);
                            match parse_event(&data) {
                                Event::Done => {}
                                Event::Chunk(chunk) => yield Ok(chunk),
                                Event::Failed(e) => yield Err(e),
                            }
                        }
                        break 'read;
                    }
                };

                for data in payloads {
                    chunk_counter += 1;
                    log_stream_chunk(chunk_counter, &data, verbose);

                    match parse_event(&data) {
                        Event::Done => {
                            log::debug!("stream completed after {} events", chunk_counter);
                            break 'read;
                        }
                        Event::Chunk(chunk) => yield Ok(chunk),
                        Event::Failed(e) => {
                            yield Err(e);
                            break 'read;
                        }
                    }
                }
            }
        };

        Ok(Box::new(Box::pin(events)))
    }
}

enum Event {
    Done,
    Chunk(StreamChunk),
    Failed(ApiError),
}

/// Classify one SSE data payload
fn parse_event(data: &str) -> Event {
    let data = data.trim();
    if data == DONE_MARKER {
        return Event::Done;
    }

    let decode_failed = |source: serde_json::Error| {
        Event::Failed(ApiError::Decode {
            payload: data.to_string(),
            source,
        })
    };

    let value: serde_json::Value = match serde_json::from_str(data) {
        Ok(value) => value,
        Err(source) => return decode_failed(source),
    };

    // Any non-null top-level `error` ends the turn, whatever its shape
    if value.get("error").is_some_and(|error| !error.is_null()) {
        let message = serde_json::from_value::<StreamError>(value.clone())
            .ok()
            .and_then(|remote| remote.message().map(str::to_string))
            .unwrap_or_else(|| value["error"].to_string());
        return Event::Failed(ApiError::Remote(message));
    }

    match serde_json::from_value::<StreamChunk>(value) {
        Ok(chunk) => Event::Chunk(chunk),
        Err(source) => decode_failed(source),
    }
}
