//! The transport abstraction the translation queue drives.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use gloss_core::TranslateError;

/// Boxed stream of raw text fragments from the remote model.
///
/// Items arrive in emission order. An `Err` item terminates the stream from
/// the consumer's point of view; no further items should be polled after it.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, TranslateError>> + Send>>;

/// A source of streamed translation text.
///
/// Implementors must be `Send + Sync` so the queue worker can hold one
/// across suspension points. The production implementation is
/// [`ChatClient`](crate::client::ChatClient); tests substitute scripted
/// fakes.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Start a streaming translation request for `text`.
    ///
    /// Resolves once response headers are in: a non-success status or a
    /// connection failure surfaces here, while mid-stream read errors
    /// surface as `Err` items of the returned stream.
    async fn stream(&self, text: &str) -> Result<FragmentStream, TranslateError>;
}

/// Map a reqwest error onto the translation error taxonomy.
///
/// Deadline expiry becomes [`TranslateError::Timeout`]; everything else is
/// a [`TranslateError::Transport`] with the error's display text.
#[must_use]
pub fn map_transport_error(err: &reqwest::Error) -> TranslateError {
    if err.is_timeout() {
        TranslateError::Timeout
    } else {
        TranslateError::Transport {
            message: err.to_string(),
        }
    }
}
