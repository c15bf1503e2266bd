// Models module - data structures for the chat session and the completion API
pub mod types;
pub mod params;
pub mod requests;
pub mod responses;


// Re-export commonly used types
pub use types::{Role, Message};
pub use params::{GenerationParams, ParamError, ParamName};
pub use requests::ChatCompletionRequest;
pub use responses::{StreamChunk, StreamChoice, StreamDelta, StreamError, Usage};
