//! # gloss-runtime
//!
//! The single-flight translation executor.
//!
//! - [`queue`]: the [`queue::TranslationQueue`] — serializes submitted jobs,
//!   drives the transport read loop through the decoder, supports
//!   cancellation, and broadcasts lifecycle events
//! - [`result`]: the per-job [`result::ResultBuilder`] that folds preview and
//!   complete sentences into an ordered result
//! - [`history`]: the bounded, newest-first result history
//! - [`emitter`]: broadcast-based [`emitter::EventEmitter`] for
//!   [`gloss_core::TranslateEvent`] dispatch
//!
//! ## Crate Position
//!
//! Sits on top of `gloss-decode` and `gloss-llm`; the CLI (or any other
//! frontend) only talks to this crate.

#![deny(unsafe_code)]

pub mod emitter;
pub mod history;
pub mod queue;
pub mod result;

pub use emitter::EventEmitter;
pub use history::{HISTORY_CAPACITY, History};
pub use queue::TranslationQueue;
pub use result::ResultBuilder;
