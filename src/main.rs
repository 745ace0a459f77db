//! careerbot - Career Path Adviser ChatBot
//!
#![doc = "careerbot - Career Path Adviser ChatBot"]
#![doc = "Main entry point for the careerbot terminal application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use careerbot::cli::{Cli, Commands};
use careerbot::commands;
use careerbot::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // A missing .env file is fine; real environment variables still apply
    let _ = dotenvy::dotenv();

    // Initialize tracing
    init_tracing(cli.verbose, cli.json_logs);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Commands that contact the completion service refuse to start without a key
    if cli.needs_completion_service() {
        config.require_api_key()?;
    }

    // Execute command
    match cli.command {
        Commands::Chat { .. } => {
            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::Ask { prompt, .. } => {
            commands::ask::run_ask(config, &prompt).await?;
            Ok(())
        }
        Commands::Industries { json, detail } => {
            commands::industries::show_industries(json, detail.as_deref())?;
            Ok(())
        }
        Commands::Intro => {
            commands::intro::show_intro();
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose {
        "careerbot=debug"
    } else {
        "careerbot=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
