use hfchat_models::{Message, Role};

/// Ordered, in-memory conversation history.
///
/// Insertion order is chronological order is display order. Messages can
/// only be appended by the turn driver; callers get read access and `reset`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    messages: Vec<Message>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of completed user/assistant exchanges
    pub fn turn_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|message| message.role() == Role::Assistant)
            .count()
    }

    /// True when the last turn failed and left a user message without a reply
    pub fn has_dangling_user_message(&self) -> bool {
        matches!(self.last(), Some(message) if message.role() == Role::User)
    }

    /// Drop the whole history
    pub fn reset(&mut self) {
        self.messages.clear();
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }
}
