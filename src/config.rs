//! Configuration management for careerbot
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{CareerbotError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the environment variable holding the completion service key
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Main configuration structure for careerbot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Completion service settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Chat session behavior
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Completion service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the OpenAI-compatible endpoint (overridable for mocks)
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Bearer credential; only ever read from the environment
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_api_base() -> String {
    "https://api.groq.com".to_string()
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model: default_model(),
            api_key: None,
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// What to do with reply text when the stream stops early
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialReplyPolicy {
    /// Record the accumulated text as the assistant reply
    #[default]
    Keep,
    /// Record the accumulated text with an "incomplete" marker appended
    Annotate,
    /// Drop the text and fail the turn
    Discard,
}

impl PartialReplyPolicy {
    /// Parse a policy name
    ///
    /// # Examples
    ///
    /// ```
    /// use careerbot::config::PartialReplyPolicy;
    ///
    /// assert_eq!(PartialReplyPolicy::parse_str("ANNOTATE").unwrap(), PartialReplyPolicy::Annotate);
    /// assert!(PartialReplyPolicy::parse_str("retry").is_err());
    /// ```
    pub fn parse_str(s: &str) -> std::result::Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "keep" => Ok(Self::Keep),
            "annotate" => Ok(Self::Annotate),
            "discard" => Ok(Self::Discard),
            other => Err(format!("Unknown partial reply policy: {}", other)),
        }
    }
}

/// Chat session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// System prompt placed first in every conversation
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Deadline for one full turn, connect plus streaming (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Handling of interrupted reply streams
    #[serde(default)]
    pub partial_reply_policy: PartialReplyPolicy,

    /// Print the industry overview when a session starts
    #[serde(default = "default_show_intro")]
    pub show_intro: bool,
}

fn default_system_prompt() -> String {
    "You are a helpful assistant.".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

fn default_show_intro() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            request_timeout_seconds: default_request_timeout(),
            partial_reply_policy: PartialReplyPolicy::default(),
            show_intro: default_show_intro(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CareerbotError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| CareerbotError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(api_key) = std::env::var(API_KEY_ENV) {
            if api_key.trim().is_empty() {
                tracing::warn!("{} is set but empty", API_KEY_ENV);
            } else {
                self.provider.api_key = Some(api_key);
            }
        }

        if let Ok(api_base) = std::env::var("CAREERBOT_API_BASE") {
            tracing::debug!(api_base = %api_base, "Env override: CAREERBOT_API_BASE");
            self.provider.api_base = api_base;
        }

        if let Ok(model) = std::env::var("CAREERBOT_MODEL") {
            tracing::debug!(model = %model, "Env override: CAREERBOT_MODEL");
            self.provider.model = model;
        }

        if let Ok(timeout) = std::env::var("CAREERBOT_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.chat.request_timeout_seconds = value;
            } else {
                tracing::warn!("Invalid CAREERBOT_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(policy) = std::env::var("CAREERBOT_PARTIAL_POLICY") {
            match PartialReplyPolicy::parse_str(&policy) {
                Ok(value) => self.chat.partial_reply_policy = value,
                Err(e) => tracing::warn!("Invalid CAREERBOT_PARTIAL_POLICY: {}", e),
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(model) = cli.model_override() {
            tracing::debug!("Using model override: {}", model);
            self.provider.model = model.to_string();
        }

        if let crate::cli::Commands::Chat { no_intro: true, .. } = cli.command {
            self.chat.show_intro = false;
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.provider.model.trim().is_empty() {
            return Err(CareerbotError::Config("provider.model cannot be empty".to_string()).into());
        }

        let api_base = url::Url::parse(&self.provider.api_base).map_err(|e| {
            CareerbotError::Config(format!(
                "provider.api_base is not a valid URL ({}): {}",
                self.provider.api_base, e
            ))
        })?;
        if !matches!(api_base.scheme(), "http" | "https") {
            return Err(CareerbotError::Config(format!(
                "provider.api_base must use http or https, got {}",
                api_base.scheme()
            ))
            .into());
        }

        if self.chat.request_timeout_seconds == 0 {
            return Err(CareerbotError::Config(
                "chat.request_timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.chat.request_timeout_seconds > 600 {
            return Err(CareerbotError::Config(
                "chat.request_timeout_seconds must be less than or equal to 600".to_string(),
            )
            .into());
        }

        if self.chat.system_prompt.trim().is_empty() {
            return Err(
                CareerbotError::Config("chat.system_prompt cannot be empty".to_string()).into(),
            );
        }

        Ok(())
    }

    /// Return the completion service credential
    ///
    /// # Errors
    ///
    /// Returns `MissingCredentials` when `GROQ_API_KEY` was not provided
    pub fn require_api_key(&self) -> Result<&str> {
        self.provider
            .api_key
            .as_deref()
            .ok_or_else(|| {
                CareerbotError::MissingCredentials(format!(
                    "{} is not set. Add it to your environment or a .env file.",
                    API_KEY_ENV
                ))
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            API_KEY_ENV,
            "CAREERBOT_API_BASE",
            "CAREERBOT_MODEL",
            "CAREERBOT_TIMEOUT_SECONDS",
            "CAREERBOT_PARTIAL_POLICY",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider.api_base, "https://api.groq.com");
        assert_eq!(config.provider.model, "llama-3.3-70b-versatile");
        assert!(config.provider.api_key.is_none());
        assert_eq!(config.chat.system_prompt, "You are a helpful assistant.");
        assert_eq!(config.chat.request_timeout_seconds, 60);
        assert_eq!(config.chat.partial_reply_policy, PartialReplyPolicy::Keep);
        assert!(config.chat.show_intro);
    }

    #[test]
    fn test_config_validation_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_model() {
        let mut config = Config::default();
        config.provider.model = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_api_base() {
        let mut config = Config::default();
        config.provider.api_base = "not a url".to_string();
        assert!(config.validate().is_err());

        config.provider.api_base = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_timeout_bounds() {
        let mut config = Config::default();
        config.chat.request_timeout_seconds = 0;
        assert!(config.validate().is_err());

        config.chat.request_timeout_seconds = 601;
        assert!(config.validate().is_err());

        config.chat.request_timeout_seconds = 600;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_system_prompt() {
        let mut config = Config::default();
        config.chat.system_prompt = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
provider:
  api_base: http://localhost:8080
  model: llama-3.1-8b-instant
  api_key: should-be-ignored

chat:
  system_prompt: You are a career adviser.
  request_timeout_seconds: 30
  partial_reply_policy: annotate
  show_intro: false
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.provider.api_base, "http://localhost:8080");
        assert_eq!(config.provider.model, "llama-3.1-8b-instant");
        assert!(config.provider.api_key.is_none());
        assert_eq!(config.chat.system_prompt, "You are a career adviser.");
        assert_eq!(config.chat.request_timeout_seconds, 30);
        assert_eq!(
            config.chat.partial_reply_policy,
            PartialReplyPolicy::Annotate
        );
        assert!(!config.chat.show_intro);
    }

    #[test]
    fn test_config_from_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("chat:\n  show_intro: false\n").unwrap();
        assert_eq!(config.provider.model, "llama-3.3-70b-versatile");
        assert_eq!(config.chat.request_timeout_seconds, 60);
        assert!(!config.chat.show_intro);
    }

    #[test]
    fn test_api_key_never_serialized() {
        let mut config = Config::default();
        config.provider.api_key = Some("gsk_secret".to_string());
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(!yaml.contains("gsk_secret"));
        assert!(!format!("{:?}", config).contains("gsk_secret"));
    }

    #[test]
    fn test_partial_reply_policy_parse() {
        assert_eq!(
            PartialReplyPolicy::parse_str("keep").unwrap(),
            PartialReplyPolicy::Keep
        );
        assert_eq!(
            PartialReplyPolicy::parse_str(" Discard ").unwrap(),
            PartialReplyPolicy::Discard
        );
        assert!(PartialReplyPolicy::parse_str("").is_err());
    }

    #[test]
    #[serial]
    fn test_load_nonexistent_file_uses_defaults() {
        clear_env();
        let cli = crate::cli::Cli::default();
        let config = Config::load("nonexistent.yaml", &cli).unwrap();
        assert_eq!(config.provider.model, "llama-3.3-70b-versatile");
        assert!(config.provider.api_key.is_none());
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        std::env::set_var(API_KEY_ENV, "gsk_test");
        std::env::set_var("CAREERBOT_MODEL", "mixtral-8x7b-32768");
        std::env::set_var("CAREERBOT_TIMEOUT_SECONDS", "15");
        std::env::set_var("CAREERBOT_PARTIAL_POLICY", "discard");

        let config = Config::load("nonexistent.yaml", &crate::cli::Cli::default()).unwrap();
        clear_env();

        assert_eq!(config.require_api_key().unwrap(), "gsk_test");
        assert_eq!(config.provider.model, "mixtral-8x7b-32768");
        assert_eq!(config.chat.request_timeout_seconds, 15);
        assert_eq!(
            config.chat.partial_reply_policy,
            PartialReplyPolicy::Discard
        );
    }

    #[test]
    #[serial]
    fn test_invalid_env_values_are_ignored() {
        clear_env();
        std::env::set_var("CAREERBOT_TIMEOUT_SECONDS", "soon");
        std::env::set_var("CAREERBOT_PARTIAL_POLICY", "retry");
        std::env::set_var(API_KEY_ENV, "   ");

        let config = Config::load("nonexistent.yaml", &crate::cli::Cli::default()).unwrap();
        clear_env();

        assert_eq!(config.chat.request_timeout_seconds, 60);
        assert_eq!(config.chat.partial_reply_policy, PartialReplyPolicy::Keep);
        assert!(config.provider.api_key.is_none());
    }

    #[test]
    #[serial]
    fn test_cli_overrides_model_and_intro() {
        clear_env();
        let cli = crate::cli::Cli {
            command: crate::cli::Commands::Chat {
                model: Some("gemma2-9b-it".to_string()),
                no_intro: true,
            },
            ..crate::cli::Cli::default()
        };
        let config = Config::load("nonexistent.yaml", &cli).unwrap();
        assert_eq!(config.provider.model, "gemma2-9b-it");
        assert!(!config.chat.show_intro);
    }

    #[test]
    fn test_require_api_key_missing() {
        let config = Config::default();
        let err = config.require_api_key().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CareerbotError>(),
            Some(CareerbotError::MissingCredentials(_))
        ));
        assert!(err.to_string().contains("GROQ_API_KEY"));
    }
}
