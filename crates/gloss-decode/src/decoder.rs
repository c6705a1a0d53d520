//! The streaming sentence decoder.
//!
//! [`StreamDecoder`] owns an accumulation buffer that newly-arrived text
//! fragments are appended to. Each [`StreamDecoder::ingest`] call peels off
//! every complete sentence object the buffer now contains, then attempts at
//! most one early preview of the in-progress object's `en`/`zh` fields.
//!
//! Malformed objects (balanced braces but undecodable contents) are dropped
//! without consuming an index and without surfacing an error: a noisy remote
//! model must not halt translation of subsequent sentences.

use gloss_core::Sentence;
use gloss_core::text::truncate_str;
use tracing::debug;

use crate::scanner::{scan_object, scan_string, unescape};

const SOURCE_KEY: &str = "\"en\"";
const TARGET_KEY: &str = "\"zh\"";

/// Incremental decoder over a growing text buffer.
///
/// One instance is created per translation job and owned exclusively by the
/// executing job. `ingest`/`finalize` are synchronous, pure transitions over
/// the owned buffer.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    buf: String,
    next_index: usize,
    previewed: bool,
    fence_checked: bool,
}

impl StreamDecoder {
    /// A fresh decoder with an empty buffer and index counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment and return every sentence event it unlocked.
    ///
    /// Complete sentences come first, in stream order, each stamped with the
    /// next sequential index and `partial = false`. At most one preview
    /// (`partial = true`, same index as the next complete sentence will get)
    /// follows; a second preview for the same index is never emitted.
    pub fn ingest(&mut self, fragment: &str) -> Vec<Sentence> {
        self.buf.push_str(fragment);
        if !self.fence_checked && !self.strip_leading_fence() {
            return Vec::new();
        }
        let mut emitted = self.drain_complete();
        if !self.previewed {
            if let Some(preview) = self.try_preview() {
                self.previewed = true;
                emitted.push(preview);
            }
        }
        emitted
    }

    /// Recover whatever the stream cut off before a trailing delimiter.
    ///
    /// Trims stray whitespace, fence backticks, and array punctuation from
    /// both ends of the leftover buffer, re-wraps it as a JSON array, and
    /// emits any sentences that parse, with indices continuing the running
    /// counter. Anything still unparsable is dropped. The buffer is emptied
    /// either way, so a second call is a no-op.
    pub fn finalize(&mut self) -> Vec<Sentence> {
        let tail = std::mem::take(&mut self.buf);
        self.previewed = false;
        let trimmed =
            tail.trim_matches(|c: char| c.is_whitespace() || matches!(c, '`' | '[' | ']' | ','));
        if trimmed.is_empty() {
            return Vec::new();
        }
        let wrapped = format!("[{trimmed}]");
        match serde_json::from_str::<Vec<Sentence>>(&wrapped) {
            Ok(sentences) => sentences
                .into_iter()
                .map(|mut sentence| {
                    sentence.index = self.next_index;
                    sentence.partial = false;
                    self.next_index += 1;
                    sentence
                })
                .collect(),
            Err(err) => {
                debug!(
                    error = %err,
                    tail = truncate_str(trimmed, 120),
                    "dropping unrecoverable stream tail"
                );
                Vec::new()
            }
        }
    }

    /// Handle a markdown code fence at the very start of the whole stream.
    ///
    /// Returns `false` when a verdict is not possible yet (buffer is still
    /// all whitespace, or an opening backtick arrived but its line has no
    /// newline yet) — the caller must wait for more input.
    fn strip_leading_fence(&mut self) -> bool {
        let Some(first) = self.buf.find(|c: char| !c.is_whitespace()) else {
            return false;
        };
        if !self.buf[first..].starts_with('`') {
            self.fence_checked = true;
            return true;
        }
        let Some(newline) = self.buf[first..].find('\n') else {
            return false;
        };
        let _ = self.buf.drain(..first + newline + 1);
        self.fence_checked = true;
        true
    }

    /// Peel complete objects off the front of the buffer.
    fn drain_complete(&mut self) -> Vec<Sentence> {
        let mut emitted = Vec::new();
        loop {
            // Skip leading whitespace and array-structural punctuation.
            let start = self
                .buf
                .find(|c: char| !c.is_whitespace() && !matches!(c, '[' | ',' | ']'));
            let Some(start) = start else {
                self.buf.clear();
                break;
            };
            if start > 0 {
                let _ = self.buf.drain(..start);
            }
            if !self.buf.starts_with('{') {
                break;
            }
            let Some(end) = scan_object(&self.buf, 0) else {
                break;
            };
            let object: String = self.buf.drain(..end).collect();
            match serde_json::from_str::<Sentence>(&object) {
                Ok(mut sentence) => {
                    sentence.index = self.next_index;
                    sentence.partial = false;
                    self.next_index += 1;
                    self.previewed = false;
                    emitted.push(sentence);
                }
                Err(err) => {
                    // Balanced braces but undecodable: drop it, keep the
                    // index for the next good object.
                    debug!(
                        error = %err,
                        object = truncate_str(&object, 120),
                        "dropping malformed sentence object"
                    );
                }
            }
        }
        emitted
    }

    /// Match two consecutive closed string fields (`"en"` then `"zh"`) in
    /// the in-progress object at the front of the buffer.
    fn try_preview(&self) -> Option<Sentence> {
        let bytes = self.buf.as_bytes();
        let key = self.buf.find(SOURCE_KEY)?;
        let mut pos = skip_ws(bytes, key + SOURCE_KEY.len());
        if bytes.get(pos) != Some(&b':') {
            return None;
        }
        pos = skip_ws(bytes, pos + 1);
        if bytes.get(pos) != Some(&b'"') {
            return None;
        }
        let source_close = scan_string(&self.buf, pos)?;
        let source = &self.buf[pos + 1..source_close];

        // Only whitespace and a single comma may sit between the fields.
        pos = skip_ws(bytes, source_close + 1);
        if bytes.get(pos) != Some(&b',') {
            return None;
        }
        pos = skip_ws(bytes, pos + 1);
        if !self.buf[pos..].starts_with(TARGET_KEY) {
            return None;
        }
        pos = skip_ws(bytes, pos + TARGET_KEY.len());
        if bytes.get(pos) != Some(&b':') {
            return None;
        }
        pos = skip_ws(bytes, pos + 1);
        if bytes.get(pos) != Some(&b'"') {
            return None;
        }
        let target_close = scan_string(&self.buf, pos)?;
        let target = &self.buf[pos + 1..target_close];

        Some(Sentence::preview(
            unescape(source),
            unescape(target),
            self.next_index,
        ))
    }
}

fn skip_ws(bytes: &[u8], mut pos: usize) -> usize {
    while matches!(bytes.get(pos), Some(b' ' | b'\t' | b'\r' | b'\n')) {
        pos += 1;
    }
    pos
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
