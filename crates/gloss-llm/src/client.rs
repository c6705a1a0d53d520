//! HTTP implementation of [`Transport`] against an OpenAI-compatible
//! chat-completion endpoint.

use std::time::Duration;

use async_trait::async_trait;
use gloss_core::TranslateError;
use gloss_core::text::truncate_str;
use serde_json::Value;
use tokio_stream::StreamExt;
use tracing::{debug, instrument, warn};

use crate::prompt::DEFAULT_SYSTEM_PROMPT;
use crate::sse::parse_sse_lines;
use crate::transport::{FragmentStream, Transport, map_transport_error};
use crate::types::{ChatChunk, ChatMessage, ChatRequest};

/// Connection settings for a [`ChatClient`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Full chat-completions URL.
    pub endpoint: String,
    /// Model identifier.
    pub model: String,
    /// Bearer token; empty means not configured.
    pub api_key: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Whole-request deadline.
    pub timeout: Duration,
    /// Overrides [`DEFAULT_SYSTEM_PROMPT`] when set.
    pub system_prompt: Option<String>,
}

/// Streaming chat-completion client.
pub struct ChatClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl ChatClient {
    /// Create a client over a fresh connection pool.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn build_request(&self, text: &str) -> ChatRequest {
        let system = self
            .config
            .system_prompt
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_PROMPT);
        ChatRequest {
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            messages: vec![ChatMessage::system(system), ChatMessage::user(text)],
            stream: true,
        }
    }
}

#[async_trait]
impl Transport for ChatClient {
    #[instrument(skip_all, fields(model = %self.config.model))]
    async fn stream(&self, text: &str) -> Result<FragmentStream, TranslateError> {
        if self.config.api_key.is_empty() {
            return Err(TranslateError::MissingCredential);
        }

        let request = self.build_request(text);
        debug!(
            endpoint = %self.config.endpoint,
            input_len = text.len(),
            "sending translation request"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .timeout(self.config.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| map_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = response_error_message(&body, status.as_u16());
            warn!(status = status.as_u16(), message = %message, "translation request rejected");
            return Err(TranslateError::BadResponse {
                status: status.as_u16(),
                message,
            });
        }

        let fragments = parse_sse_lines(response.bytes_stream()).filter_map(|item| match item {
            Ok(data) => parse_chunk(&data).and_then(ChatChunk::content).map(Ok),
            Err(err) => Some(Err(err)),
        });

        Ok(Box::pin(fragments))
    }
}

/// Pull a human-readable message out of an error response body.
///
/// Tries the standard `{"error": {"message": "..."}}` envelope first, then
/// falls back to the (truncated) raw body.
fn response_error_message(body: &str, status: u16) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(msg) = json["error"]["message"].as_str() {
            return msg.to_string();
        }
    }
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {}", truncate_str(body, 200))
    }
}

/// Parse one SSE data payload as a [`ChatChunk`], skipping bad payloads.
fn parse_chunk(data: &str) -> Option<ChatChunk> {
    match serde_json::from_str(data) {
        Ok(chunk) => Some(chunk),
        Err(e) => {
            warn!(
                error = %e,
                data_preview = truncate_str(data, 100),
                "failed to parse SSE chunk"
            );
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
