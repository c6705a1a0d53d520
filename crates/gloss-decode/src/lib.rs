//! # gloss-decode
//!
//! Incremental decoding of a streamed JSON array of sentence objects.
//!
//! The remote model streams its answer token by token, so at any instant the
//! accumulated text is usually cut mid-object. This crate turns that growing
//! buffer into sentence events:
//!
//! - [`scanner`]: escape-aware scanning primitives that find the end of a
//!   balanced `{...}` object or a closed string literal without parsing
//! - [`decoder`]: the [`decoder::StreamDecoder`] state machine that peels
//!   complete objects off the buffer and extracts early two-field previews
//!
//! ## Crate Position
//!
//! Depends only on `gloss-core`. Pure and synchronous — no network or
//! concurrency; the translation queue in `gloss-runtime` drives it.

#![deny(unsafe_code)]

pub mod decoder;
pub mod scanner;

pub use decoder::StreamDecoder;
pub use scanner::{scan_object, scan_string, unescape};
