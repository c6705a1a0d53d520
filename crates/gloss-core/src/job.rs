//! Translation jobs, provenance tags, and immutable results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sentence::Sentence;

/// Where a translation request came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Text recognized from a screen capture.
    ScreenCapture,
    /// Text picked up from a selection watcher.
    TextSelection,
    /// Text entered by hand.
    Manual,
    /// A re-run of an earlier result.
    Retranslation,
}

/// A queued unit of translation work.
///
/// Created on submission, consumed when it begins executing, discarded
/// after completion or cancellation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationJob {
    /// Input text to translate.
    pub text: String,
    /// Origin of the request.
    pub provenance: Provenance,
    /// Submission timestamp.
    pub submitted_at: DateTime<Utc>,
}

impl TranslationJob {
    /// Create a job stamped with the current UTC time.
    #[must_use]
    pub fn new(text: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            text: text.into(),
            provenance,
            submitted_at: Utc::now(),
        }
    }
}

/// The immutable outcome of a completed job.
///
/// Equality is keyed by the submission timestamp — timestamps are assumed
/// unique for ordering and history purposes.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    /// Submission timestamp of the originating job.
    pub submitted_at: DateTime<Utc>,
    /// Original input text.
    pub text: String,
    /// Final ordered sentence sequence.
    pub sentences: Vec<Sentence>,
    /// Origin of the originating job.
    pub provenance: Provenance,
    /// Elapsed time from job start to stream end.
    pub elapsed_ms: u64,
}

impl PartialEq for TranslationResult {
    fn eq(&self, other: &Self) -> bool {
        self.submitted_at == other.submitted_at
    }
}

impl Eq for TranslationResult {}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
