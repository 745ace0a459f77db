//! Groq provider implementation for careerbot
//!
//! This module implements the Provider trait for Groq's OpenAI-compatible
//! chat completions endpoint. Requests always ask for a streamed reply; the
//! `text/event-stream` body is decoded into a [`FragmentStream`] of text deltas.

use crate::config::ProviderConfig;
use crate::error::{CareerbotError, Result};
use crate::providers::sse::SseDecoder;
use crate::providers::{FragmentStream, Message, Provider, SamplingParameters};

use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const CHAT_COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";
const DONE_SENTINEL: &str = "[DONE]";

/// Groq chat completions provider
///
/// # Examples
///
/// ```no_run
/// use careerbot::config::ProviderConfig;
/// use careerbot::providers::{GroqProvider, Message, Provider, SamplingParameters};
/// use futures::StreamExt;
///
/// # async fn example() -> careerbot::error::Result<()> {
/// let config = ProviderConfig {
///     api_key: Some("gsk_...".to_string()),
///     ..ProviderConfig::default()
/// };
/// let provider = GroqProvider::new(config)?;
/// let messages = vec![Message::system("You are a helpful assistant."), Message::user("Hi")];
/// let mut fragments = provider
///     .stream_completion(&messages, &SamplingParameters::default())
///     .await?;
/// while let Some(fragment) = fragments.next().await {
///     print!("{}", fragment?);
/// }
/// # Ok(())
/// # }
/// ```
pub struct GroqProvider {
    client: Client,
    config: ProviderConfig,
    api_key: String,
}

/// Request body for the chat completions endpoint
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    top_p: f32,
    max_completion_tokens: u32,
    stream: bool,
    stop: Option<Vec<String>>,
}

/// One streamed chunk
#[derive(Debug, Deserialize)]
struct ChatCompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    #[serde(default)]
    error: Option<StreamErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamErrorBody {
    #[serde(default)]
    message: String,
}

impl GroqProvider {
    /// Create a new Groq provider instance
    ///
    /// # Errors
    ///
    /// Returns `MissingCredentials` if the config carries no API key, or a
    /// provider error if the HTTP client cannot be built
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                CareerbotError::MissingCredentials(format!(
                    "{} is required to talk to the completion service",
                    crate::config::API_KEY_ENV
                ))
            })?;

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("careerbot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CareerbotError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized Groq provider: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Full URL of the chat completions endpoint
    ///
    /// # Examples
    ///
    /// ```
    /// use careerbot::config::ProviderConfig;
    /// use careerbot::providers::GroqProvider;
    ///
    /// let config = ProviderConfig {
    ///     api_base: "http://localhost:8080/".to_string(),
    ///     api_key: Some("test".to_string()),
    ///     ..ProviderConfig::default()
    /// };
    /// let provider = GroqProvider::new(config).unwrap();
    /// assert_eq!(
    ///     provider.completions_url(),
    ///     "http://localhost:8080/openai/v1/chat/completions"
    /// );
    /// ```
    pub fn completions_url(&self) -> String {
        format!(
            "{}{}",
            self.config.api_base.trim_end_matches('/'),
            CHAT_COMPLETIONS_PATH
        )
    }

    fn build_request<'a>(
        &'a self,
        messages: &'a [Message],
        sampling: &SamplingParameters,
    ) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.config.model,
            messages,
            temperature: sampling.temperature,
            top_p: sampling.top_p,
            max_completion_tokens: sampling.max_completion_tokens,
            stream: true,
            stop: None,
        }
    }
}

#[async_trait]
impl Provider for GroqProvider {
    async fn stream_completion(
        &self,
        messages: &[Message],
        sampling: &SamplingParameters,
    ) -> Result<FragmentStream> {
        let request = self.build_request(messages, sampling);

        tracing::debug!(
            "Sending Groq request: {} messages, model={}",
            request.messages.len(),
            request.model
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Groq request failed: {}", e);
                CareerbotError::ServiceUnavailable(format!("Groq request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Groq returned error {}: {}", status, error_text);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    CareerbotError::Authentication(format!("Groq returned {}: {}", status, error_text))
                }
                _ => CareerbotError::ServiceUnavailable(format!(
                    "Groq returned error {}: {}",
                    status, error_text
                )),
            }
            .into());
        }

        Ok(decode_fragment_stream(response.bytes_stream()))
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }
}

/// Turn a raw `text/event-stream` body into reply text fragments
///
/// Each chunk yields its first choice's `delta.content`, or an empty string
/// when the chunk carries no text. The stream ends cleanly at `[DONE]`; a body
/// that ends without `[DONE]` or a `finish_reason` yields a trailing error.
pub(crate) fn decode_fragment_stream<S, E>(byte_stream: S) -> FragmentStream
where
    S: Stream<Item = std::result::Result<Bytes, E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    Box::pin(async_stream::try_stream! {
        let mut decoder = SseDecoder::new();
        let mut finished = false;
        let mut chunks = 0usize;

        futures::pin_mut!(byte_stream);
        'read: while let Some(chunk) = byte_stream.next().await {
            let chunk = chunk.map_err(|e| {
                CareerbotError::Provider(format!("stream transport error: {}", e))
            })?;

            for event in decoder.push(&chunk) {
                if event.data == DONE_SENTINEL {
                    finished = true;
                    break 'read;
                }
                let (fragment, done) = parse_chunk(&event.data)?;
                chunks += 1;
                finished |= done;
                yield fragment;
            }
        }

        if !finished {
            if let Some(event) = decoder.finish() {
                if event.data == DONE_SENTINEL {
                    finished = true;
                } else {
                    let (fragment, done) = parse_chunk(&event.data)?;
                    chunks += 1;
                    finished |= done;
                    yield fragment;
                }
            }
        }

        tracing::debug!(chunks, finished, "Groq stream closed");

        if !finished {
            Err::<(), _>(CareerbotError::Provider(
                "stream ended before the reply was complete".to_string(),
            ))?;
        }
    })
}

fn parse_chunk(data: &str) -> std::result::Result<(String, bool), CareerbotError> {
    let chunk: ChatCompletionChunk = serde_json::from_str(data)
        .map_err(|e| CareerbotError::Provider(format!("malformed stream chunk: {}", e)))?;

    if let Some(error) = chunk.error {
        return Err(CareerbotError::Provider(format!(
            "service reported an error mid-stream: {}",
            error.message
        )));
    }

    let choice = chunk.choices.into_iter().next();
    let done = choice
        .as_ref()
        .map(|c| c.finish_reason.is_some())
        .unwrap_or(false);
    let fragment = choice.and_then(|c| c.delta.content).unwrap_or_default();
    Ok((fragment, done))
}
