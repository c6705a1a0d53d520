//! Per-job result assembly.

use std::time::Instant;

use gloss_core::{Sentence, TranslationJob, TranslationResult};

/// Folds decoder events into the ordered sentence list of a running job.
///
/// Owned exclusively by the executing job; discarded without finishing on
/// cancellation or error.
#[derive(Debug)]
pub struct ResultBuilder {
    job: TranslationJob,
    started: Instant,
    sentences: Vec<Sentence>,
}

impl ResultBuilder {
    /// Start assembling a result for `job`, stamping the start instant.
    #[must_use]
    pub fn new(job: &TranslationJob) -> Self {
        Self {
            job: job.clone(),
            started: Instant::now(),
            sentences: Vec::new(),
        }
    }

    /// Fold one decoder event into the running sentence list.
    ///
    /// A complete sentence replaces an existing entry at its index, or
    /// appends. A preview replaces an existing preview or appends — but a
    /// complete sentence is never overwritten by a later preview for the
    /// same index, even if a buggy upstream delivers one out of order.
    ///
    /// Returns `false` when the event was ignored under that rule.
    pub fn fold(&mut self, sentence: &Sentence) -> bool {
        if let Some(existing) = self
            .sentences
            .iter_mut()
            .find(|s| s.index == sentence.index)
        {
            if sentence.partial && !existing.partial {
                return false;
            }
            *existing = sentence.clone();
        } else {
            self.sentences.push(sentence.clone());
        }
        true
    }

    /// Number of sentences folded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Whether nothing has been folded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Seal the result, computing elapsed time from job start to now.
    #[must_use]
    pub fn finish(self) -> TranslationResult {
        TranslationResult {
            submitted_at: self.job.submitted_at,
            text: self.job.text,
            sentences: self.sentences,
            provenance: self.job.provenance,
            elapsed_ms: u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
