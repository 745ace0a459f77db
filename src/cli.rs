//! Command-line interface definition for careerbot
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat, one-shot questions and
//! browsing the industry catalog.

use clap::{Parser, Subcommand};

/// Career Path Adviser ChatBot
///
/// Ask about career paths, job recommendations, or industry trends.
#[derive(Parser, Debug, Clone)]
#[command(name = "careerbot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for careerbot
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Override the configured model
        #[arg(short, long)]
        model: Option<String>,

        /// Do not print the industry overview when the session starts
        #[arg(long)]
        no_intro: bool,
    },

    /// Ask a single question and print the reply
    Ask {
        /// Question to send
        #[arg(short, long)]
        prompt: String,

        /// Override the configured model
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Show the growing industries catalog
    Industries {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,

        /// Show details for one industry (1-based index or name)
        #[arg(short, long)]
        detail: Option<String>,
    },

    /// Print the introductory industry summary
    Intro,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Model override supplied on the command line, if any
    pub fn model_override(&self) -> Option<&str> {
        match &self.command {
            Commands::Chat { model, .. } | Commands::Ask { model, .. } => model.as_deref(),
            _ => None,
        }
    }

    /// Whether the selected command talks to the completion service
    pub fn needs_completion_service(&self) -> bool {
        matches!(self.command, Commands::Chat { .. } | Commands::Ask { .. })
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            json_logs: false,
            command: Commands::Intro,
        }
    }
}
