//! Base provider trait and common types for careerbot
//!
//! This module defines the Provider trait that completion services implement,
//! along with the message type shared by the conversation history, the
//! display transcript and the wire format.

use crate::error::Result;
use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::pin::Pin;

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System prompt
    System,
    /// Human user
    User,
    /// Model reply
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// Message structure for conversation
///
/// Messages are immutable once created: fields are private and only
/// readable through accessors. Serializes as `{"role": ..., "content": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use careerbot::providers::{Message, Role};
    ///
    /// let msg = Message::user("Which industry grows fastest?");
    /// assert_eq!(msg.role(), Role::User);
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Creates a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Role of the sender
    pub fn role(&self) -> Role {
        self.role
    }

    /// Message text
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Sampling configuration sent with every completion request
///
/// The values are fixed; [`SamplingParameters::default`] is the only
/// configuration the chat session uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplingParameters {
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling mass
    pub top_p: f32,
    /// Upper bound on generated tokens
    pub max_completion_tokens: u32,
}

impl Default for SamplingParameters {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 1.0,
            max_completion_tokens: 1024,
        }
    }
}

/// Lazy, finite, non-restartable sequence of reply text fragments
///
/// Fragments may be empty. Consumers concatenate them in delivery order.
/// An `Err` item means the stream was interrupted; nothing follows it.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Provider trait for completion services
///
/// `stream_completion` returns once the service has accepted the request;
/// errors returned here mean no reply text will arrive for this turn.
///
/// # Examples
///
/// ```no_run
/// use careerbot::providers::{FragmentStream, Message, Provider, SamplingParameters};
/// use careerbot::error::Result;
/// use async_trait::async_trait;
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl Provider for EchoProvider {
///     async fn stream_completion(
///         &self,
///         messages: &[Message],
///         _sampling: &SamplingParameters,
///     ) -> Result<FragmentStream> {
///         let last = messages.last().map(|m| m.content().to_string()).unwrap_or_default();
///         Ok(Box::pin(futures::stream::iter(vec![Ok(last)])))
///     }
///
///     fn model(&self) -> String {
///         "echo".to_string()
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Start a streamed completion over the full conversation history
    ///
    /// # Errors
    ///
    /// Returns error if the request cannot be established or is rejected
    async fn stream_completion(
        &self,
        messages: &[Message],
        sampling: &SamplingParameters,
    ) -> Result<FragmentStream>;

    /// Identifier of the model requests are sent to
    fn model(&self) -> String;
}
