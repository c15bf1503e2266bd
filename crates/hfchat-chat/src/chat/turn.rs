use std::pin::Pin;
use std::sync::Arc;

use async_stream::stream;
use futures::{Stream, StreamExt};

use hfchat_llm_api::LlmClient;
use hfchat_models::{GenerationParams, Message};

use crate::chat::session::Session;
use crate::error::ChatError;

/// Text fragments of one assistant reply, in arrival order.
///
/// Holds the session's `&mut` borrow until dropped, so only one turn can be
/// in flight per session.
pub type FragmentStream<'a> = Pin<Box<dyn Stream<Item = Result<String, ChatError>> + Send + 'a>>;

/// Drives one user/assistant exchange at a time against an `LlmClient`
pub struct ChatTurnDriver {
    client: Arc<dyn LlmClient>,
}

impl ChatTurnDriver {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Submit `user_text` and stream the reply.
    ///
    /// Nothing happens until the stream is polled. Blank input yields an empty
    /// stream without touching the session or the service. On success the
    /// concatenated fragments are appended as the assistant message once the
    /// upstream stream is exhausted. On failure the error is the last item and
    /// the partial reply is discarded; the user message stays in the session.
    pub fn submit_turn<'a>(
        &'a self,
        session: &'a mut Session,
        user_text: &str,
        params: GenerationParams,
    ) -> FragmentStream<'a> {
        let user_text = user_text.to_string();

        Box::pin(stream! {
            if user_text.trim().is_empty() {
                log::debug!("ignoring blank input");
                return;
            }

            session.push(Message::user(user_text));
            log::debug!("turn started, {} messages in session", session.len());

            let mut events = match self.client.chat_streaming(session.messages(), &params).await {
                Ok(events) => events,
                Err(e) => {
                    log::warn!("could not start completion: {}", e);
                    yield Err::<String, ChatError>(ChatError::StreamFailure(e));
                    return;
                }
            };

            let mut buffer = String::new();
            let mut fragments = 0usize;

            while let Some(event) = events.next().await {
                let chunk = match event {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        log::warn!("stream failed after {} fragments, discarding partial reply: {}", fragments, e);
                        yield Err(ChatError::StreamFailure(e));
                        return;
                    }
                };

                // Events without choices or delta content are skipped
                if let Some(fragment) = chunk.content_delta() {
                    let fragment = fragment.to_string();
                    buffer.push_str(&fragment);
                    fragments += 1;
                    yield Ok(fragment);
                }
                if let Some(reason) = chunk.finish_reason() {
                    log::debug!("finish reason: {}", reason);
                }
            }

            log::debug!("turn finished: {} fragments, {} chars", fragments, buffer.chars().count());
            session.push(Message::assistant(buffer));
        })
    }
}
