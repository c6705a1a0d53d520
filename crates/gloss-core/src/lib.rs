//! # gloss-core
//!
//! Foundation types for the gloss streaming translator.
//!
//! This crate provides the shared vocabulary the other gloss crates depend on:
//!
//! - **Sentences**: [`sentence::Sentence`] with its nested
//!   [`sentence::Analysis`] and recursive [`sentence::Chunk`] grammar tree
//! - **Jobs**: [`job::TranslationJob`], [`job::TranslationResult`], and the
//!   closed [`job::Provenance`] set
//! - **Errors**: [`errors::TranslateError`] taxonomy via `thiserror`
//! - **Events**: [`events::TranslateEvent`] emitted by the translation queue
//! - **Text**: UTF-8-safe truncation helpers for log previews
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other gloss crates.

#![deny(unsafe_code)]

pub mod errors;
pub mod events;
pub mod job;
pub mod sentence;
pub mod text;

pub use errors::TranslateError;
pub use events::TranslateEvent;
pub use job::{Provenance, TranslationJob, TranslationResult};
pub use sentence::{Analysis, Chunk, Sentence};
