//! # gloss-llm
//!
//! Streaming chat-completion transport.
//!
//! Talks to an OpenAI-compatible chat-completion endpoint over HTTP SSE and
//! exposes the response as an ordered stream of raw text fragments:
//!
//! - [`transport`]: the [`transport::Transport`] trait the translation queue
//!   drives, plus reqwest error mapping
//! - [`client`]: the [`client::ChatClient`] HTTP implementation
//! - [`sse`]: SSE line buffering, `data: ` extraction, `[DONE]` filtering
//! - [`types`]: request/response wire types for the chat-completion API
//! - [`prompt`]: the system prompt that fixes the response contract
//!
//! ## Crate Position
//!
//! Everything downstream of the fragment stream (JSON-object extraction,
//! previews) lives in `gloss-decode`; this crate only peels the transport
//! envelope.

#![deny(unsafe_code)]

pub mod client;
pub mod prompt;
pub mod sse;
pub mod transport;
pub mod types;

pub use client::{ChatClient, ClientConfig};
pub use transport::{FragmentStream, Transport};
