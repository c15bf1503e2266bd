//! # hfchat-llm-api
//!
//! Streaming client for hosted chat-completion endpoints: the Hugging Face
//! inference router and any other OpenAI-compatible `chat/completions` server.
//!
//! ## Features
//!
//! - **`LlmClient` trait**: the seam the chat driver talks to, so tests can
//!   swap in a scripted client
//! - **Server-Sent Events decoding**: byte-level, tolerant of events split
//!   across network reads
//! - **Endpoint helpers**: default router URL and base-URL normalization
//!
//! ## Example
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use hfchat_llm_api::{ClientConfig, HfInferenceClient, LlmClient};
//! use hfchat_models::{GenerationParams, Message};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), hfchat_llm_api::ApiError> {
//!     let client = HfInferenceClient::new(ClientConfig::new("hf_xxx", "openai/gpt-oss-20b"));
//!     let messages = vec![Message::user("Hello!")];
//!
//!     let mut events = client.chat_streaming(&messages, &GenerationParams::default()).await?;
//!     while let Some(chunk) = events.next().await {
//!         if let Some(text) = chunk?.content_delta() {
//!             print!("{}", text);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod sse;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use client::{
    LlmClient,
    ChunkStream,
    hf::HfInferenceClient,
};

pub use config::{
    ClientConfig,
    HF_ROUTER_URL,
    DEFAULT_MODEL_ID,
    normalize_api_url,
};

pub use error::{ApiError, Result};
