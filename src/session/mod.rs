//! Chat session management
//!
//! - [`conversation`] -- API-bound history and display transcript
//! - [`state`] -- caller-owned per-session state
//! - [`chat`] -- turn logic over a completion provider

pub mod chat;
pub mod conversation;
pub mod state;

pub use chat::{ChatSession, Reply, ReplyStatus, INCOMPLETE_MARKER};
pub use conversation::{ConversationHistory, DisplayTranscript};
pub use state::{SessionState, TurnPhase};
