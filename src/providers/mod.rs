//! Provider module for careerbot
//!
//! This module contains the completion provider abstraction, the Groq
//! implementation, the SSE decoder it relies on, and a scripted fake used
//! by tests.

pub mod base;
pub mod fake;
pub mod groq;
pub mod sse;

pub use base::{FragmentStream, Message, Provider, Role, SamplingParameters};
pub use groq::GroqProvider;

use crate::config::ProviderConfig;
use crate::error::Result;

/// Create the completion provider described by `config`
///
/// # Errors
///
/// Returns error if the credential is missing or the client cannot be built
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    Ok(Box::new(GroqProvider::new(config.clone())?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_without_key_fails() {
        let config = ProviderConfig::default();
        assert!(create_provider(&config).is_err());
    }

    #[test]
    fn test_create_provider_with_key() {
        let config = ProviderConfig {
            api_key: Some("gsk_test".to_string()),
            ..ProviderConfig::default()
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.model(), "llama-3.3-70b-versatile");
    }
}
