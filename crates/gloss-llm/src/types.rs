//! Wire types for the OpenAI-compatible chat-completion API.

use serde::{Deserialize, Serialize};

/// A single chat message in the request payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatMessage {
    /// `"system"` or `"user"`.
    pub role: &'static str,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// A system-role message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    /// A user-role message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// Request body for a streaming chat completion.
#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest {
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Ordered message list (system prompt first).
    pub messages: Vec<ChatMessage>,
    /// Always `true` here.
    pub stream: bool,
}

/// One decoded SSE chunk of the streamed response.
///
/// Every field defaults so malformed or keep-alive chunks decode to an
/// empty chunk instead of failing.
#[derive(Debug, Default, Deserialize)]
pub struct ChatChunk {
    /// Completion choices; the first carries the delta.
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

/// A choice within a [`ChatChunk`].
#[derive(Debug, Default, Deserialize)]
pub struct ChunkChoice {
    /// Incremental content delta.
    #[serde(default)]
    pub delta: ChunkDelta,
    /// Set on the final chunk of the stream.
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The delta payload of a [`ChunkChoice`].
#[derive(Debug, Default, Deserialize)]
pub struct ChunkDelta {
    /// New text, absent on role-only and final chunks.
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatChunk {
    /// The text fragment this chunk carries, if any.
    #[must_use]
    pub fn content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta.content)
            .filter(|content| !content.is_empty())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_expected_shape() {
        let request = ChatRequest {
            model: "gpt-4o-mini".into(),
            temperature: 0.2,
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hello")],
            stream: true,
        };
        let v = serde_json::to_value(&request).unwrap();
        assert_eq!(v["model"], "gpt-4o-mini");
        assert_eq!(v["stream"], true);
        assert_eq!(v["messages"][0]["role"], "system");
        assert_eq!(v["messages"][1]["content"], "hello");
    }

    #[test]
    fn chunk_content_extracts_first_delta() {
        let chunk: ChatChunk = serde_json::from_str(
            r#"{"choices":[{"delta":{"content":"[{\"en\":"},"finish_reason":null}]}"#,
        )
        .unwrap();
        assert_eq!(chunk.content().as_deref(), Some("[{\"en\":"));
    }

    #[test]
    fn chunk_without_content_yields_none() {
        let role_only: ChatChunk =
            serde_json::from_str(r#"{"choices":[{"delta":{"role":"assistant"}}]}"#).unwrap();
        assert!(role_only.content().is_none());

        let finished: ChatChunk =
            serde_json::from_str(r#"{"choices":[{"delta":{},"finish_reason":"stop"}]}"#).unwrap();
        assert!(finished.content().is_none());

        let empty: ChatChunk = serde_json::from_str(r"{}").unwrap();
        assert!(empty.content().is_none());
    }

    #[test]
    fn empty_string_content_yields_none() {
        let chunk: ChatChunk =
            serde_json::from_str(r#"{"choices":[{"delta":{"content":""}}]}"#).unwrap();
        assert!(chunk.content().is_none());
    }
}
