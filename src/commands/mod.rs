/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

- `chat`        - Interactive career chat
- `ask`         - One question, one printed reply
- `intro`       - Print the industry overview
- `industries`  - Industry cards, JSON and detail views
*/

use crate::catalog::{build_intro_message, list_industries};
use crate::config::Config;
use crate::error::{CareerbotError, Result};
use crate::providers::{create_provider, Message, Role};
use crate::session::{ChatSession, Reply, ReplyStatus, SessionState};

pub mod industries;
pub mod special_commands;

/// Target of the sidebar "Exit" link
pub const EXIT_URL: &str = "https://career-chat-ai.vercel.app";

/// Build a chat session for the configured provider
///
/// # Errors
///
/// Returns `CareerbotError::MissingCredentials` if no API key is configured
fn build_session(config: &Config) -> Result<ChatSession> {
    let provider = create_provider(&config.provider)?;
    Ok(ChatSession::new_boxed(provider, &config.chat))
}

/// Print one transcript entry with a colored role label
fn print_message(message: &Message) {
    use colored::Colorize;

    let label = match message.role() {
        Role::User => "You".bold().cyan(),
        Role::Assistant => "Adviser".bold().green(),
        Role::System => "System".bold().dimmed(),
    };
    println!("{}: {}\n", label, message.content());
}

/// Print the notice shown under a reply that arrived incomplete
fn print_partial_notice(reply: &Reply) {
    use colored::Colorize;

    if let ReplyStatus::Partial { reason } = &reply.status {
        eprintln!(
            "{}",
            format!("The reply was cut short ({}); showing what arrived.", reason).yellow()
        );
    }
}

/// Describe a failed turn for the user
///
/// Turn failures leave the session usable; anything else is reported as a
/// plain error.
fn describe_turn_error(error: &anyhow::Error) -> String {
    match error.downcast_ref::<CareerbotError>() {
        Some(CareerbotError::Authentication(msg)) => format!(
            "The completion service rejected the API key ({}). Check GROQ_API_KEY.",
            msg
        ),
        Some(CareerbotError::PartialStream { reason, .. }) => format!(
            "The reply was interrupted ({}) and has been discarded. Please try again.",
            reason
        ),
        Some(e) if e.is_turn_failure() => format!(
            "The adviser is unavailable right now: {}. Your message was kept; please try again.",
            e
        ),
        _ => format!("Error: {}", error),
    }
}

pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! Creates the provider and a [`ChatSession`], seeds a fresh
    //! [`SessionState`], and runs a readline loop that either handles a
    //! special command locally or submits the line as one chat turn.

    use super::*;
    use crate::commands::industries::{lookup, print_industry_detail, print_industry_table};
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start interactive chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    ///
    /// # Errors
    ///
    /// Returns error if the provider cannot be created or the terminal
    /// cannot be opened. Failed turns are reported and do not end the loop.
    ///
    /// # Examples
    ///
    /// ```
    /// use careerbot::commands::chat;
    /// use careerbot::config::Config;
    ///
    /// // In application code:
    /// // chat::run_chat(Config::default()).await?;
    /// ```
    pub async fn run_chat(config: Config) -> Result<()> {
        use colored::Colorize;

        tracing::info!("Starting interactive chat mode");

        let session = build_session(&config)?;
        let model = session.model();
        let mut state = SessionState::new();
        session.initialize(&mut state);
        tracing::debug!(session_id = %state.id(), model = %model, "Chat session ready");

        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&model);
        if config.chat.show_intro {
            println!("{}\n", build_intro_message(list_industries()));
        }
        if state.sidebar_visible() {
            print_sidebar(&model);
        }

        loop {
            let prompt = format!("{} ", "You>".bold().cyan());
            match rl.readline(&prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    let command = match parse_special_command(&line) {
                        Ok(command) => command,
                        Err(e) => {
                            eprintln!("{}\n", e.to_string().red());
                            continue;
                        }
                    };

                    match command {
                        SpecialCommand::Help => {
                            print_help();
                            continue;
                        }
                        SpecialCommand::ListIndustries => {
                            print_industry_table(list_industries());
                            continue;
                        }
                        SpecialCommand::ShowIndustry(query) => {
                            match lookup(&query) {
                                Ok(record) => print_industry_detail(record),
                                Err(e) => eprintln!("{}\n", e.to_string().red()),
                            }
                            continue;
                        }
                        SpecialCommand::ShowHistory => {
                            print_transcript(&state);
                            continue;
                        }
                        SpecialCommand::ShowStatus => {
                            print_status_display(&state, &model, &session);
                            continue;
                        }
                        SpecialCommand::ToggleSidebar => {
                            if state.toggle_sidebar() {
                                print_sidebar(&model);
                            } else {
                                println!("Sidebar hidden. Type '/sidebar' to show it again.\n");
                            }
                            continue;
                        }
                        SpecialCommand::Clear => {
                            rl.clear_screen()?;
                            continue;
                        }
                        SpecialCommand::Exit => break,
                        SpecialCommand::None => {
                            // Regular chat turn
                        }
                    }

                    rl.add_history_entry(line.as_str())?;

                    println!("{}", "Adviser is typing...".dimmed());
                    match session.submit(&mut state, &line).await {
                        Ok(Some(reply)) => {
                            if let Some(message) = state.transcript().entries().last() {
                                print_message(message);
                            }
                            print_partial_notice(&reply);
                        }
                        Ok(None) => {}
                        Err(e) => {
                            eprintln!("{}\n", describe_turn_error(&e).red());
                        }
                    }

                    if state.sidebar_visible() {
                        print_sidebar(&model);
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        tracing::info!(
            session_id = %state.id(),
            completed = state.completed_turns(),
            failed = state.failed_turns(),
            "Chat session ended"
        );
        println!("Goodbye! Continue at {}", EXIT_URL);
        Ok(())
    }

    /// Display welcome banner at the start of interactive chat mode
    pub(crate) fn print_welcome_banner(model: &str) {
        use colored::Colorize;

        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║             Career Path Adviser ChatBot - Welcome!           ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Model: {}", model.cyan());
        println!("Ask about career paths, job recommendations, or industry trends.");
        println!("Type '/help' for available commands, 'exit' to quit\n");
    }

    /// Display the sidebar block: model name and the Exit link
    pub(crate) fn print_sidebar(model: &str) {
        use colored::Colorize;

        println!("┌─ {} ", "Sidebar".bold());
        println!("│ Model: {}", model);
        println!("│ Exit:  {}", EXIT_URL.underline());
        println!("└─ /sidebar to hide\n");
    }

    /// Reprint the display transcript
    pub(crate) fn print_transcript(state: &SessionState) {
        if state.transcript().is_empty() {
            println!("No messages yet. Ask a question to get started.\n");
            return;
        }
        println!();
        for message in state.transcript().iter() {
            print_message(message);
        }
    }

    /// Display session status
    pub(crate) fn print_status_display(state: &SessionState, model: &str, session: &ChatSession) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                    Career Chat Session Status                ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Session ID:        {}", state.id());
        println!("Model:             {}", model);
        println!("Phase:             {}", state.phase());
        println!("Completed Turns:   {}", state.completed_turns());
        println!("Failed Turns:      {}", state.failed_turns());
        println!(
            "Conversation Size: {} messages",
            state.history().map(|h| h.len()).unwrap_or(0)
        );
        println!("Partial Replies:   {:?}", session.partial_policy());
        println!(
            "Sidebar:           {}",
            if state.sidebar_visible() { "shown" } else { "hidden" }
        );
        println!();
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::providers::fake::{FakeProvider, ScriptedReply};

        #[tokio::test]
        async fn test_run_chat_without_api_key_fails() {
            let config = Config::default();
            let err = run_chat(config).await.unwrap_err();
            assert!(matches!(
                err.downcast_ref::<CareerbotError>(),
                Some(CareerbotError::MissingCredentials(_))
            ));
        }

        #[test]
        fn test_print_welcome_banner_and_sidebar() {
            print_welcome_banner("llama-3.3-70b-versatile");
            print_sidebar("llama-3.3-70b-versatile");
        }

        #[tokio::test]
        async fn test_print_transcript_and_status_after_turn() {
            let session = ChatSession::new(
                FakeProvider::new(vec![ScriptedReply::fragments(["Try ", "EdTech."])]),
                &Config::default().chat,
            );
            let mut state = SessionState::new();
            print_transcript(&state);

            session.submit(&mut state, "Where should I start?").await.unwrap();
            print_transcript(&state);
            print_status_display(&state, &session.model(), &session);
        }
    }
}

pub mod ask {
    //! One-shot question handler.

    use super::*;

    /// Send `prompt` as a single turn and print the reply to stdout
    ///
    /// # Errors
    ///
    /// Returns error if the prompt is blank, the credential is missing, or
    /// the turn fails
    pub async fn run_ask(config: Config, prompt: &str) -> Result<()> {
        tracing::info!("Starting one-shot question");

        let session = build_session(&config)?;
        let mut state = SessionState::new();
        session.initialize(&mut state);

        match session.submit(&mut state, prompt).await? {
            Some(reply) => {
                println!("{}", reply.text);
                print_partial_notice(&reply);
                Ok(())
            }
            None => Err(CareerbotError::Config("Prompt must not be empty".to_string()).into()),
        }
    }

}

pub mod intro {
    //! Industry overview handler.

    use super::*;

    /// Print the introductory industry summary
    pub fn show_intro() {
        println!("{}", build_intro_message(list_industries()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_turn_error_service_unavailable() {
        let err: anyhow::Error = CareerbotError::ServiceUnavailable("timeout".into()).into();
        let text = describe_turn_error(&err);
        assert!(text.contains("unavailable"));
        assert!(text.contains("timeout"));
        assert!(text.contains("kept"));
    }

    #[test]
    fn test_describe_turn_error_authentication() {
        let err: anyhow::Error = CareerbotError::Authentication("401".into()).into();
        assert!(describe_turn_error(&err).contains("GROQ_API_KEY"));
    }

    #[test]
    fn test_describe_turn_error_discarded_partial() {
        let err: anyhow::Error = CareerbotError::PartialStream {
            reason: "reset".into(),
            partial: "Hal".into(),
        }
        .into();
        assert!(describe_turn_error(&err).contains("discarded"));
    }

    #[test]
    fn test_describe_turn_error_other() {
        let err = anyhow::anyhow!("boom");
        assert_eq!(describe_turn_error(&err), "Error: boom");
    }

    #[test]
    fn test_print_message_all_roles() {
        print_message(&Message::user("hi"));
        print_message(&Message::assistant("hello"));
        print_message(&Message::system("sys"));
    }
}
