//! Error taxonomy for translation jobs.
//!
//! These are the terminating outcomes of a queue job. Decoder-level
//! malformed-object conditions are recovered locally inside the decoder and
//! never surface here — a noisy remote model must not abort an otherwise
//! good stream.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A terminating condition for a translation job.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TranslateError {
    /// No API key configured — fails before any network call.
    #[error("no API key configured")]
    MissingCredential,

    /// Network/connection failure from the transport.
    #[error("transport failure: {message}")]
    Transport {
        /// Error description.
        message: String,
    },

    /// Non-success status or unparsable outer envelope.
    #[error("bad response ({status}): {message}")]
    BadResponse {
        /// HTTP status code.
        status: u16,
        /// Error description from the endpoint.
        message: String,
    },

    /// The caller cancelled the in-flight job.
    #[error("translation cancelled")]
    Cancelled,

    /// The transport-level deadline elapsed.
    #[error("request timed out")]
    Timeout,
}

impl TranslateError {
    /// Whether callers should present this silently.
    ///
    /// Cancellation is user-initiated; surfacing it as an error message
    /// would be spurious.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Category string for logging.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingCredential => "credential",
            Self::Transport { .. } => "transport",
            Self::BadResponse { .. } => "bad_response",
            Self::Cancelled => "cancelled",
            Self::Timeout => "timeout",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
