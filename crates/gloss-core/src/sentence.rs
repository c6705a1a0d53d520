//! Sentence, analysis, and grammar-chunk types.
//!
//! These mirror the wire contract the remote model is prompted to emit: a
//! JSON array of per-sentence objects carrying `en`/`zh` text and an optional
//! nested grammar breakdown. Every nested field tolerates absence — a noisy
//! model must not make an otherwise-good sentence undecodable.

use serde::{Deserialize, Serialize};

/// A node in the recursive grammar-breakdown tree.
///
/// Children's spans are assumed to concatenate to the parent's span;
/// the model is prompted for that shape but nothing enforces it here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Source-language span.
    #[serde(rename = "en", default)]
    pub source: String,
    /// Target-language span.
    #[serde(rename = "zh", default)]
    pub target: String,
    /// Syntactic role label (e.g., `"subject"`, `"predicate"`).
    #[serde(default)]
    pub role: String,
    /// Ordered child chunks; empty for leaves.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Chunk>,
}

/// Grammar analysis attached to a fully parsed sentence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Clause-structure summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<String>,
    /// Tense/voice summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tense: Option<String>,
    /// Root chunk sequence.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chunks: Vec<Chunk>,
    /// Short usage tip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

/// The atomic decoded unit of a translation stream.
///
/// `index` and `partial` are assigned by the decoder, never by the wire;
/// both default when deserializing a raw wire object. At most one partial
/// sentence exists for a given index at a time, and a complete sentence is
/// never overwritten by a later preview for the same index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    /// Source-language text.
    #[serde(rename = "en", default)]
    pub source: String,
    /// Target-language text.
    #[serde(rename = "zh", default)]
    pub target: String,
    /// Grammar analysis; absent on previews and tolerated absent on
    /// complete sentences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Analysis>,
    /// Position within the parent job, monotonically increasing.
    #[serde(default)]
    pub index: usize,
    /// Whether this is an early preview awaiting the complete sentence.
    #[serde(rename = "isPartial", default)]
    pub partial: bool,
}

impl Sentence {
    /// An early preview carrying only the two text fields.
    #[must_use]
    pub fn preview(source: impl Into<String>, target: impl Into<String>, index: usize) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            analysis: None,
            index,
            partial: true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
