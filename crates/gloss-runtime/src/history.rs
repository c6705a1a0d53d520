//! Bounded, newest-first result history.

use std::collections::VecDeque;

use gloss_core::TranslationResult;

/// Maximum number of retained results.
pub const HISTORY_CAPACITY: usize = 50;

/// Ordered history of completed translations, newest first.
#[derive(Debug, Default)]
pub struct History {
    entries: VecDeque<TranslationResult>,
}

impl History {
    /// An empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the front, evicting the oldest past [`HISTORY_CAPACITY`].
    pub fn push(&mut self, result: TranslationResult) {
        self.entries.push_front(result);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// The most recent result.
    #[must_use]
    pub fn latest(&self) -> Option<&TranslationResult> {
        self.entries.front()
    }

    /// Snapshot of all entries, newest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<TranslationResult> {
        self.entries.iter().cloned().collect()
    }

    /// Number of retained results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
