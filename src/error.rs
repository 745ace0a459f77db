//! Error types for careerbot
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for careerbot operations
///
/// Covers startup configuration problems, completion service failures,
/// interrupted streams, and the usual I/O and parsing conversions.
#[derive(Error, Debug)]
pub enum CareerbotError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Required credential is absent (fatal at startup)
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Completion service could not be reached or rejected the request
    /// before any reply text arrived
    #[error("Completion service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Completion service rejected the credential (HTTP 401/403)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Stream ended before the reply was logically complete
    #[error("Reply stream interrupted: {reason}")]
    PartialStream {
        /// Why the stream stopped
        reason: String,
        /// Text accumulated before the interruption
        partial: String,
    },

    /// Industry selector matched no catalog entry
    #[error("Unknown industry: {0}")]
    UnknownIndustry(String),

    /// Provider-related errors (client construction, malformed payloads)
    #[error("Provider error: {0}")]
    Provider(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl CareerbotError {
    /// Whether this error ends a single turn but leaves the session usable
    ///
    /// # Examples
    ///
    /// ```
    /// use careerbot::error::CareerbotError;
    ///
    /// assert!(CareerbotError::ServiceUnavailable("down".into()).is_turn_failure());
    /// assert!(!CareerbotError::MissingCredentials("GROQ_API_KEY".into()).is_turn_failure());
    /// ```
    pub fn is_turn_failure(&self) -> bool {
        matches!(
            self,
            Self::ServiceUnavailable(_)
                | Self::Authentication(_)
                | Self::PartialStream { .. }
                | Self::Http(_)
        )
    }
}

/// Result type alias for careerbot operations
///
/// Uses `anyhow::Error` so call sites can attach context; typed failures
/// are recovered with `downcast_ref::<CareerbotError>()`.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = CareerbotError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_missing_credentials_error_display() {
        let error = CareerbotError::MissingCredentials("GROQ_API_KEY".to_string());
        assert_eq!(error.to_string(), "Missing credentials: GROQ_API_KEY");
    }

    #[test]
    fn test_service_unavailable_display() {
        let error = CareerbotError::ServiceUnavailable("connection refused".to_string());
        assert_eq!(
            error.to_string(),
            "Completion service unavailable: connection refused"
        );
    }

    #[test]
    fn test_unknown_industry_display() {
        let error = CareerbotError::UnknownIndustry("Mining".to_string());
        assert_eq!(error.to_string(), "Unknown industry: Mining");
        assert!(!error.is_turn_failure());
    }

    #[test]
    fn test_partial_stream_display_omits_partial_text() {
        let error = CareerbotError::PartialStream {
            reason: "timed out".to_string(),
            partial: "Hel".to_string(),
        };
        assert_eq!(error.to_string(), "Reply stream interrupted: timed out");
    }

    #[test]
    fn test_turn_failure_classification() {
        assert!(CareerbotError::Authentication("bad key".into()).is_turn_failure());
        assert!(CareerbotError::PartialStream {
            reason: "eof".into(),
            partial: String::new()
        }
        .is_turn_failure());
        assert!(!CareerbotError::Config("x".into()).is_turn_failure());
        assert!(!CareerbotError::Provider("x".into()).is_turn_failure());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: CareerbotError = io_error.into();
        assert!(matches!(error, CareerbotError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let error: CareerbotError = json_error.into();
        assert!(matches!(error, CareerbotError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: CareerbotError = yaml_error.into();
        assert!(matches!(error, CareerbotError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CareerbotError>();
    }

    #[test]
    fn test_anyhow_downcast_recovers_variant() {
        let err: anyhow::Error = CareerbotError::ServiceUnavailable("down".into()).into();
        assert!(matches!(
            err.downcast_ref::<CareerbotError>(),
            Some(CareerbotError::ServiceUnavailable(_))
        ));
    }
}
