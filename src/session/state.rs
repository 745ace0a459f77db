//! Per-user session state
//!
//! A [`SessionState`] is owned by the caller (the terminal loop) and passed
//! by mutable reference into every [`ChatSession`](super::ChatSession)
//! operation, so one state can never see two turns in flight.

use super::conversation::{ConversationHistory, DisplayTranscript};

use std::ops::{Deref, DerefMut};
use tracing::warn;
use uuid::Uuid;

/// Whether a turn is currently waiting on the completion service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TurnPhase {
    /// Ready to accept input
    #[default]
    Idle,
    /// A user message was recorded and the reply is being streamed
    AwaitingResponse,
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnPhase::Idle => write!(f, "idle"),
            TurnPhase::AwaitingResponse => write!(f, "awaiting response"),
        }
    }
}

/// Everything one user's chat keeps between turns
#[derive(Debug, Clone)]
pub struct SessionState {
    id: Uuid,
    history: Option<ConversationHistory>,
    transcript: DisplayTranscript,
    sidebar_visible: bool,
    phase: TurnPhase,
    completed_turns: usize,
    failed_turns: usize,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Create an uninitialized session
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            history: None,
            transcript: DisplayTranscript::new(),
            sidebar_visible: true,
            phase: TurnPhase::Idle,
            completed_turns: 0,
            failed_turns: 0,
        }
    }

    /// Session identifier used in log fields
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Whether the history has been seeded
    pub fn is_initialized(&self) -> bool {
        self.history.is_some()
    }

    /// API-bound history, if initialized
    pub fn history(&self) -> Option<&ConversationHistory> {
        self.history.as_ref()
    }

    /// User-visible transcript
    pub fn transcript(&self) -> &DisplayTranscript {
        &self.transcript
    }

    pub fn sidebar_visible(&self) -> bool {
        self.sidebar_visible
    }

    /// Flip sidebar visibility and return the new value
    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_visible = !self.sidebar_visible;
        self.sidebar_visible
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Turns that produced an assistant message
    pub fn completed_turns(&self) -> usize {
        self.completed_turns
    }

    /// Turns that ended without an assistant message
    pub fn failed_turns(&self) -> usize {
        self.failed_turns
    }

    /// 1-based number of the next turn
    pub fn next_turn_number(&self) -> usize {
        self.completed_turns + self.failed_turns + 1
    }

    /// Seed the history with `seed` unless it already exists
    pub(crate) fn ensure_history<F>(&mut self, seed: F) -> &ConversationHistory
    where
        F: FnOnce() -> ConversationHistory,
    {
        self.history.get_or_insert_with(seed)
    }

    /// Record the user message in both views and enter `AwaitingResponse`
    ///
    /// Returns the history to send, seeding it first if needed.
    pub(crate) fn begin_turn<F>(&mut self, user_text: &str, seed: F) -> &ConversationHistory
    where
        F: FnOnce() -> ConversationHistory,
    {
        self.transcript.push_user(user_text);
        self.phase = TurnPhase::AwaitingResponse;
        let history = self.history.get_or_insert_with(seed);
        history.push_user(user_text);
        history
    }

    /// Record the assistant message in both views and return to `Idle`
    pub(crate) fn complete_turn(&mut self, assistant_text: &str) {
        if let Some(history) = self.history.as_mut() {
            history.push_assistant(assistant_text);
        }
        self.transcript.push_assistant(assistant_text);
        self.completed_turns += 1;
        self.phase = TurnPhase::Idle;
    }

    /// Return to `Idle` leaving the user message without a reply
    pub(crate) fn fail_turn(&mut self) {
        self.failed_turns += 1;
        self.phase = TurnPhase::Idle;
    }
}

/// Exclusive borrow of a [`SessionState`] for the length of one turn
///
/// If the guard is dropped while the state is still `AwaitingResponse`
/// (the turn future was cancelled), the turn is recorded as failed.
pub(crate) struct TurnGuard<'a> {
    state: &'a mut SessionState,
}

impl<'a> TurnGuard<'a> {
    pub(crate) fn new(state: &'a mut SessionState) -> Self {
        Self { state }
    }
}

impl Deref for TurnGuard<'_> {
    type Target = SessionState;

    fn deref(&self) -> &SessionState {
        self.state
    }
}

impl DerefMut for TurnGuard<'_> {
    fn deref_mut(&mut self) -> &mut SessionState {
        self.state
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        if self.state.phase == TurnPhase::AwaitingResponse {
            warn!(session_id = %self.state.id, "Turn abandoned before a reply was recorded");
            self.state.fail_turn();
        }
    }
}
