//! Conversation history and display transcript
//!
//! Two parallel views of one chat:
//!
//! - [`ConversationHistory`] is sent verbatim to the completion service. It
//!   always starts with the system prompt and only ever grows.
//! - [`DisplayTranscript`] is what the user sees. It can never hold a system
//!   message.

use crate::providers::{Message, Role};

/// API-bound message history
///
/// The first element is the system prompt; there is no API to remove or
/// reorder messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    /// Start a history with the given system prompt
    ///
    /// # Examples
    ///
    /// ```
    /// use careerbot::session::ConversationHistory;
    /// use careerbot::providers::Role;
    ///
    /// let history = ConversationHistory::new("You are a helpful assistant.");
    /// assert_eq!(history.len(), 1);
    /// assert_eq!(history.messages()[0].role(), Role::System);
    /// ```
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    /// Append a user message
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Append an assistant message
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// All messages, system prompt first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The system prompt text
    pub fn system_prompt(&self) -> &str {
        self.messages[0].content()
    }

    /// Number of messages including the system prompt
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: the system prompt is always present
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Most recent message
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Display-only transcript of user and assistant messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayTranscript {
    entries: Vec<Message>,
}

impl DisplayTranscript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user message
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.entries.push(Message::user(content));
    }

    /// Append an assistant message
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.entries.push(Message::assistant(content));
    }

    /// Entries in display order
    pub fn entries(&self) -> &[Message] {
        &self.entries
    }

    /// Iterate entries in display order
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been shown yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count of entries with the given role
    pub fn count_role(&self, role: Role) -> usize {
        self.entries.iter().filter(|m| m.role() == role).count()
    }
}
