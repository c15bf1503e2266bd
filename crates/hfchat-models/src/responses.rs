use serde::Deserialize;

/// Token usage information, sent by some servers on the final chunk.
///
/// Servers differ in which counters they report, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: Option<usize>,
    #[serde(default)]
    pub completion_tokens: Option<usize>,
    #[serde(default)]
    pub total_tokens: Option<usize>,
}

// ============================================================================
// Streaming Response Structures
// ============================================================================

/// One `data:` event of a streaming chat completion
#[derive(Debug, Clone, Deserialize)]
pub struct StreamChunk {
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl StreamChunk {
    /// Text carried by the first choice, if any.
    ///
    /// Chunks without choices, without a delta or with an empty delta yield
    /// `None`; they are keep-alives or role/finish markers, not content.
    pub fn content_delta(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.delta.as_ref())
            .and_then(|delta| delta.content.as_deref())
            .filter(|content| !content.is_empty())
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.finish_reason.as_deref())
    }
}

/// Choice structure within streaming chunk
#[derive(Debug, Clone, Deserialize)]
pub struct StreamChoice {
    #[serde(default)]
    pub delta: Option<StreamDelta>,
    #[serde(default)]
    pub index: Option<i32>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Delta structure within streaming choice
#[derive(Debug, Clone, Deserialize)]
pub struct StreamDelta {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Error payload some servers emit inside an otherwise successful stream
#[derive(Debug, Clone, Deserialize)]
pub struct StreamError {
    pub error: ErrorBody,
}

/// Either a bare string or an object. Objects match regardless of which
/// fields they carry.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorBody {
    Message(String),
    Detailed {
        #[serde(default)]
        message: Option<String>,
        #[serde(default, rename = "type")]
        kind: Option<String>,
    },
}

impl StreamError {
    /// Human readable text, when the server sent any
    pub fn message(&self) -> Option<&str> {
        match &self.error {
            ErrorBody::Message(message) => Some(message),
            ErrorBody::Detailed { message, kind, .. } => message.as_deref().or(kind.as_deref()),
        }
    }
}
