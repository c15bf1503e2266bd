use serde::Serialize;

use crate::params::GenerationParams;
use crate::types::Message;

/// Streaming chat-completion request body (OpenAI-compatible)
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub stream: bool,
}

impl ChatCompletionRequest {
    /// Build a streaming request for the whole conversation
    pub fn streaming(model: impl Into<String>, messages: &[Message], params: &GenerationParams) -> Self {
        Self {
            model: model.into(),
            messages: messages.to_vec(),
            max_tokens: params.max_tokens(),
            temperature: params.temperature(),
            top_p: params.top_p(),
            stream: true,
        }
    }
}
