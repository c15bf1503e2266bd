//! Conversation management for hfchat
//!
//! This crate owns the in-memory chat session and the turn driver that
//! streams one assistant reply per user message.

pub mod chat;
pub mod error;


// Re-export commonly used types
pub use chat::session::Session;
pub use chat::turn::{ChatTurnDriver, FragmentStream};
pub use error::{ChatError, Result};
