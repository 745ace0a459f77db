//! careerbot - Career Path Adviser ChatBot library
//!
//! This library provides the pieces behind the `careerbot` terminal chat:
//! a static catalog of growing industries, a streaming completion provider,
//! and the session logic that accumulates streamed replies into an explicit,
//! caller-owned conversation state.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `catalog`: Static industry records and the intro/detail messages built from them
//! - `session`: Conversation history, display transcript, and turn logic
//! - `providers`: Completion provider abstraction and the Groq implementation
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `commands`: Handlers invoked by the CLI
//!
//! # Example
//!
//! ```no_run
//! use careerbot::providers::create_provider;
//! use careerbot::session::{ChatSession, SessionState};
//! use careerbot::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let session = ChatSession::new_boxed(create_provider(&config.provider)?, &config.chat);
//!     let mut state = SessionState::new();
//!     session.initialize(&mut state);
//!     if let Some(reply) = session.submit(&mut state, "Which industry fits a biology graduate?").await? {
//!         println!("{}", reply.text);
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod providers;
pub mod session;

// Re-export commonly used types
pub use catalog::{build_intro_message, list_industries, IndustryRecord};
pub use config::Config;
pub use error::{CareerbotError, Result};
pub use session::{ChatSession, Reply, ReplyStatus, SessionState};
