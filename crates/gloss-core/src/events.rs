//! Events published over the translation queue's broadcast channel.

use serde::{Deserialize, Serialize};

use crate::errors::TranslateError;
use crate::job::{Provenance, TranslationResult};
use crate::sentence::Sentence;

/// A lifecycle or progress event for a translation job.
///
/// Events for a single job arrive in order: one [`JobStarted`], zero or more
/// [`Sentence`] updates, then exactly one of [`JobCompleted`] or
/// [`JobFailed`].
///
/// [`JobStarted`]: TranslateEvent::JobStarted
/// [`Sentence`]: TranslateEvent::Sentence
/// [`JobCompleted`]: TranslateEvent::JobCompleted
/// [`JobFailed`]: TranslateEvent::JobFailed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TranslateEvent {
    /// A job left the backlog and began executing.
    JobStarted {
        /// Input text of the job.
        text: String,
        /// Origin of the job.
        provenance: Provenance,
    },
    /// A sentence preview appeared or a sentence completed.
    Sentence {
        /// The decoded sentence; `partial` distinguishes previews.
        sentence: Sentence,
    },
    /// The job finished and its result was appended to history.
    JobCompleted {
        /// The immutable result.
        result: TranslationResult,
    },
    /// The job terminated without a result.
    JobFailed {
        /// The terminating condition.
        error: TranslateError,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serializes_type_tag() {
        let v = serde_json::to_value(TranslateEvent::JobStarted {
            text: "hello".into(),
            provenance: Provenance::Manual,
        })
        .unwrap();
        assert_eq!(v["type"], "job_started");
        assert_eq!(v["provenance"], "manual");
    }

    #[test]
    fn sentence_event_round_trips() {
        let event = TranslateEvent::Sentence {
            sentence: Sentence::preview("Hi.", "你好。", 0),
        };
        let v = serde_json::to_value(&event).unwrap();
        assert_eq!(v["type"], "sentence");
        assert_eq!(v["sentence"]["isPartial"], true);
        let back: TranslateEvent = serde_json::from_value(v).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn failed_event_carries_error_kind() {
        let v = serde_json::to_value(TranslateEvent::JobFailed {
            error: TranslateError::Timeout,
        })
        .unwrap();
        assert_eq!(v["type"], "job_failed");
        assert_eq!(v["error"]["kind"], "timeout");
    }
}
