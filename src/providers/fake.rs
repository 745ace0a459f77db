//! In-process scripted provider for tests
//!
//! [`FakeProvider`] replays a queue of [`ScriptedReply`] values, one per
//! `stream_completion` call, and records every message history it was sent.
//! It lets session logic be exercised without network I/O.
//!
//! # Example
//!
//! ```
//! use careerbot::providers::fake::{FakeProvider, ScriptedReply};
//! use careerbot::providers::{Message, Provider, SamplingParameters};
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let provider = FakeProvider::new(vec![ScriptedReply::fragments(["Hel", "", "lo"])]);
//! let stream = provider
//!     .stream_completion(&[Message::user("hi")], &SamplingParameters::default())
//!     .await
//!     .unwrap();
//! let text: Vec<String> = stream.map(|f| f.unwrap()).collect().await;
//! assert_eq!(text.concat(), "Hello");
//! assert_eq!(provider.requests().len(), 1);
//! # }
//! ```

use crate::error::{CareerbotError, Result};
use crate::providers::{FragmentStream, Message, Provider, SamplingParameters};

use async_trait::async_trait;
use futures::StreamExt;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One scripted outcome for a `stream_completion` call
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Stream these fragments, then end cleanly
    Fragments(Vec<String>),
    /// Fail before any fragment is produced
    FailBeforeStream(String),
    /// Stream these fragments, then yield an error
    InterruptAfter {
        /// Fragments delivered before the interruption
        fragments: Vec<String>,
        /// Error text of the interruption
        reason: String,
    },
    /// Stream these fragments, then never produce another item
    StallAfter(Vec<String>),
}

impl ScriptedReply {
    /// Convenience constructor for [`ScriptedReply::Fragments`]
    pub fn fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Fragments(fragments.into_iter().map(Into::into).collect())
    }
}

/// Provider that replays scripted replies
#[derive(Debug)]
pub struct FakeProvider {
    model: String,
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl FakeProvider {
    /// Create a provider that replays `replies` in order
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            model: "fake-model".to_string(),
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue another reply
    pub fn push_reply(&self, reply: ScriptedReply) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
    }

    /// Every message history received so far, oldest first
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Provider for FakeProvider {
    async fn stream_completion(
        &self,
        messages: &[Message],
        _sampling: &SamplingParameters,
    ) -> Result<FragmentStream> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(messages.to_vec());
        }

        let reply = self
            .replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front())
            .unwrap_or_else(|| ScriptedReply::FailBeforeStream("no scripted reply".to_string()));

        let stream: FragmentStream = match reply {
            ScriptedReply::Fragments(fragments) => {
                Box::pin(futures::stream::iter(
                    fragments.into_iter().map(Ok::<String, anyhow::Error>),
                ))
            }
            ScriptedReply::FailBeforeStream(reason) => {
                return Err(CareerbotError::ServiceUnavailable(reason).into());
            }
            ScriptedReply::InterruptAfter { fragments, reason } => {
                let items = fragments
                    .into_iter()
                    .map(Ok::<String, anyhow::Error>)
                    .chain(std::iter::once(Err(CareerbotError::Provider(reason).into())));
                Box::pin(futures::stream::iter(items))
            }
            ScriptedReply::StallAfter(fragments) => Box::pin(
                futures::stream::iter(fragments.into_iter().map(Ok::<String, anyhow::Error>))
                    .chain(futures::stream::pending()),
            ),
        };
        Ok(stream)
    }

    fn model(&self) -> String {
        self.model.clone()
    }
}
