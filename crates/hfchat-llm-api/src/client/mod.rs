use async_trait::async_trait;
use futures::Stream;

use hfchat_models::{GenerationParams, Message, StreamChunk};
use crate::error::Result;

pub mod hf;

/// Decoded events of one streaming completion, in arrival order.
///
/// The stream ends when the server closes it or sends `[DONE]`; an `Err`
/// item is always the last item.
pub type ChunkStream = Box<dyn Stream<Item = Result<StreamChunk>> + Send + Unpin>;

/// LLM client trait - the interface the chat driver streams completions through
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Model identifier sent with every request
    fn model(&self) -> &str;

    /// Start a streaming chat completion over the whole conversation.
    ///
    /// Fails before yielding anything when the request cannot be sent or the
    /// server answers with a non-success status.
    async fn chat_streaming(&self, messages: &[Message], params: &GenerationParams) -> Result<ChunkStream>;
}
