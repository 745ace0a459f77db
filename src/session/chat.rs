//! Chat session turn logic
//!
//! [`ChatSession`] drives one request/response cycle per user submission
//! against a [`Provider`], accumulating the streamed reply into the caller's
//! [`SessionState`].

use crate::catalog::{build_intro_message, list_industries};
use crate::config::{ChatConfig, PartialReplyPolicy};
use crate::error::{CareerbotError, Result};
use crate::providers::{Message, Provider, SamplingParameters};
use crate::session::state::TurnGuard;
use crate::session::{ConversationHistory, SessionState};

use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};

/// Suffix appended to a stored partial reply under [`PartialReplyPolicy::Annotate`]
pub const INCOMPLETE_MARKER: &str = " [reply incomplete]";

/// How a turn's reply ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyStatus {
    /// The service signalled the end of the reply
    Complete,
    /// The stream stopped early; the text is what arrived before `reason`
    Partial {
        /// Why the stream stopped
        reason: String,
    },
}

/// Assistant reply recorded for one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Text appended to both histories
    pub text: String,
    pub status: ReplyStatus,
}

impl Reply {
    /// Whether the reply arrived in full
    pub fn is_complete(&self) -> bool {
        self.status == ReplyStatus::Complete
    }
}

/// Result of draining one fragment stream
enum StreamOutcome {
    Complete(String),
    Interrupted { partial: String, reason: String },
}

/// Turn logic over a completion provider
///
/// The session itself is stateless between turns; everything that
/// persists lives in the [`SessionState`] passed to each call.
pub struct ChatSession {
    provider: Arc<dyn Provider>,
    system_prompt: String,
    sampling: SamplingParameters,
    request_timeout: Duration,
    partial_policy: PartialReplyPolicy,
}

impl ChatSession {
    /// Create a chat session
    ///
    /// # Arguments
    ///
    /// * `provider` - Completion provider
    /// * `config` - Chat configuration (system prompt, timeout, partial policy)
    ///
    /// # Examples
    ///
    /// ```
    /// use careerbot::config::ChatConfig;
    /// use careerbot::providers::fake::FakeProvider;
    /// use careerbot::session::{ChatSession, SessionState};
    ///
    /// let session = ChatSession::new(FakeProvider::new(vec![]), &ChatConfig::default());
    /// let mut state = SessionState::new();
    /// session.initialize(&mut state);
    /// assert_eq!(state.history().unwrap().len(), 2);
    /// assert!(state.transcript().is_empty());
    /// ```
    pub fn new(provider: impl Provider + 'static, config: &ChatConfig) -> Self {
        Self::from_shared(Arc::new(provider), config)
    }

    /// Create a chat session from a boxed provider
    pub fn new_boxed(provider: Box<dyn Provider>, config: &ChatConfig) -> Self {
        Self::from_shared(Arc::from(provider), config)
    }

    /// Create a chat session from a provider the caller also holds
    pub fn from_shared(provider: Arc<dyn Provider>, config: &ChatConfig) -> Self {
        Self {
            provider,
            system_prompt: config.system_prompt.clone(),
            sampling: SamplingParameters::default(),
            request_timeout: Duration::from_secs(config.request_timeout_seconds),
            partial_policy: config.partial_reply_policy,
        }
    }

    /// Override the per-turn deadline
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Model the provider sends requests to
    pub fn model(&self) -> String {
        self.provider.model()
    }

    pub fn partial_policy(&self) -> PartialReplyPolicy {
        self.partial_policy
    }

    /// Seed `state` with the system prompt and industry intro
    ///
    /// Does nothing if the history already exists. The intro goes into the
    /// API-bound history only; the display transcript stays untouched.
    pub fn initialize(&self, state: &mut SessionState) {
        if state.is_initialized() {
            return;
        }
        state.ensure_history(|| self.seed_history());
        debug!(session_id = %state.id(), "Session initialized");
    }

    fn seed_history(&self) -> ConversationHistory {
        let mut history = ConversationHistory::new(self.system_prompt.clone());
        history.push_assistant(build_intro_message(list_industries()));
        history
    }

    /// Run one turn for `user_text`
    ///
    /// Blank input is ignored and yields `Ok(None)`. Otherwise the user
    /// message is recorded, the full history is streamed to the provider,
    /// and the accumulated reply is recorded and returned.
    ///
    /// # Errors
    ///
    /// - `CareerbotError::ServiceUnavailable` / `Authentication` if no reply
    ///   text arrived; the user message stays recorded without a reply
    /// - `CareerbotError::PartialStream` if the stream broke and the partial
    ///   policy is `discard`
    ///
    /// Dropping the returned future mid-turn records the turn as failed and
    /// leaves `state` idle, with the user message kept.
    pub async fn submit(&self, state: &mut SessionState, user_text: &str) -> Result<Option<Reply>> {
        if user_text.trim().is_empty() {
            debug!("Ignoring blank submission");
            return Ok(None);
        }

        let mut state = TurnGuard::new(state);
        let session_id = state.id();
        let turn = state.next_turn_number();
        let history = state.begin_turn(user_text, || self.seed_history());
        debug!(
            %session_id,
            turn,
            messages = history.len(),
            "Sending conversation to completion service"
        );

        let outcome = self.collect_reply(history.messages()).await;

        match outcome {
            Ok(StreamOutcome::Complete(text)) => {
                info!(%session_id, turn, chars = text.len(), "Turn completed");
                state.complete_turn(&text);
                Ok(Some(Reply {
                    text,
                    status: ReplyStatus::Complete,
                }))
            }
            Ok(StreamOutcome::Interrupted { partial, reason }) if partial.is_empty() => {
                warn!(%session_id, turn, %reason, "Reply stream failed before any text arrived");
                state.fail_turn();
                Err(CareerbotError::ServiceUnavailable(reason).into())
            }
            Ok(StreamOutcome::Interrupted { partial, reason }) => {
                self.finish_partial(&mut state, turn, partial, reason)
            }
            Err(e) => {
                warn!(%session_id, turn, error = %e, "Turn failed");
                state.fail_turn();
                Err(e)
            }
        }
    }

    fn finish_partial(
        &self,
        state: &mut SessionState,
        turn: usize,
        partial: String,
        reason: String,
    ) -> Result<Option<Reply>> {
        warn!(
            session_id = %state.id(),
            turn,
            chars = partial.len(),
            policy = ?self.partial_policy,
            %reason,
            "Reply stream interrupted"
        );

        let text = match self.partial_policy {
            PartialReplyPolicy::Keep => partial,
            PartialReplyPolicy::Annotate => format!("{}{}", partial, INCOMPLETE_MARKER),
            PartialReplyPolicy::Discard => {
                state.fail_turn();
                return Err(CareerbotError::PartialStream { reason, partial }.into());
            }
        };

        state.complete_turn(&text);
        Ok(Some(Reply {
            text,
            status: ReplyStatus::Partial { reason },
        }))
    }

    /// Stream one reply under a single deadline covering connect and body
    async fn collect_reply(&self, messages: &[Message]) -> Result<StreamOutcome> {
        let deadline = Instant::now() + self.request_timeout;
        let timeout_reason = || format!("no reply within {:?}", self.request_timeout);

        let mut stream = match timeout_at(
            deadline,
            self.provider.stream_completion(messages, &self.sampling),
        )
        .await
        {
            Ok(stream) => stream?,
            Err(_) => return Err(CareerbotError::ServiceUnavailable(timeout_reason()).into()),
        };

        let mut reply = String::new();
        let mut fragments = 0usize;
        loop {
            match timeout_at(deadline, stream.next()).await {
                Ok(Some(Ok(fragment))) => {
                    fragments += 1;
                    reply.push_str(&fragment);
                }
                Ok(Some(Err(e))) => {
                    return Ok(StreamOutcome::Interrupted {
                        partial: reply,
                        reason: e.to_string(),
                    });
                }
                Ok(None) => break,
                Err(_) => {
                    return Ok(StreamOutcome::Interrupted {
                        partial: reply,
                        reason: timeout_reason(),
                    });
                }
            }
        }

        debug!(fragments, chars = reply.len(), "Reply stream finished");
        Ok(StreamOutcome::Complete(reply))
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("model", &self.provider.model())
            .field("request_timeout", &self.request_timeout)
            .field("partial_policy", &self.partial_policy)
            .finish()
    }
}
