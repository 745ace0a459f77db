//! Special commands parser for interactive chat mode
//!
//! Lines starting with `/` are handled locally instead of being sent to the
//! completion service. They let users browse the industry catalog, review
//! the transcript, inspect session status, toggle the sidebar and exit.
//!
//! Commands are case-insensitive; the `/industry` argument keeps its case.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Display help information
    Help,

    /// Show the industry cards
    ListIndustries,

    /// Show the detail view for one industry (index or name)
    ShowIndustry(String),

    /// Reprint the conversation transcript
    ShowHistory,

    /// Display session status (model, turns, phase)
    ShowStatus,

    /// Toggle the sidebar block
    ToggleSidebar,

    /// Clear the terminal screen; the transcript is kept
    Clear,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// The input should be sent to the completion service.
    None,
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns CommandError::UnknownCommand if input starts with "/" but is not a valid command.
/// Returns CommandError::UnsupportedArgument if a command that takes no argument receives one.
/// Returns CommandError::MissingArgument if `/industry` is given without a selector.
///
/// # Examples
///
/// ```
/// use careerbot::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// let cmd = parse_special_command("/industry Healthcare").unwrap();
/// assert_eq!(cmd, SpecialCommand::ShowIndustry("Healthcare".to_string()));
///
/// let cmd = parse_special_command("which field should I pick?").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    let no_arg = |cmd: SpecialCommand| {
        if arg.is_empty() {
            Ok(cmd)
        } else {
            Err(CommandError::UnsupportedArgument {
                command: command.clone(),
                arg: arg.to_string(),
            })
        }
    };

    match command.as_str() {
        "/help" | "/?" => no_arg(SpecialCommand::Help),
        "/industries" => no_arg(SpecialCommand::ListIndustries),
        "/industry" => {
            if arg.is_empty() {
                Err(CommandError::MissingArgument {
                    command: "/industry".to_string(),
                    usage: "/industry <number|name>".to_string(),
                })
            } else {
                Ok(SpecialCommand::ShowIndustry(arg.to_string()))
            }
        }
        "/history" => no_arg(SpecialCommand::ShowHistory),
        "/status" => no_arg(SpecialCommand::ShowStatus),
        "/sidebar" => no_arg(SpecialCommand::ToggleSidebar),
        "/clear" => no_arg(SpecialCommand::Clear),
        "exit" | "quit" | "/exit" | "/quit" => no_arg(SpecialCommand::Exit),
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

/// Display help text for special commands
///
/// # Examples
///
/// ```
/// use careerbot::commands::special_commands::print_help;
///
/// print_help();
/// ```
pub fn print_help() {
    println!(
        r#"
Special Commands for Career Chat
================================

INDUSTRY CATALOG:
  /industries          - Show the growing industries table
  /industry <n|name>   - Show details for one industry (e.g. /industry 3)

SESSION INFORMATION:
  /history        - Reprint the conversation so far
  /status         - Show model, turn counts and session id
  /sidebar        - Show or hide the sidebar
  /help           - Show this help message
  /?              - Same as /help

SESSION CONTROL:
  /clear          - Clear the screen (the conversation is kept)
  exit            - Exit the chat
  quit            - Same as exit

NOTES:
  - Commands are case-insensitive
  - Regular text (not starting with /) is sent to the adviser
  - Industry details are shown locally and are not sent to the adviser
"#
    );
}
