//! SSE line parsing for the chat-completion stream.
//!
//! The endpoint streams `data: <json>` lines terminated by a literal
//! `data: [DONE]` marker. This module buffers raw bytes, splits them into
//! lines, and yields the JSON payload strings, leaving chunk-level parsing
//! to the caller.

use bytes::{Bytes, BytesMut};
use futures::Stream;
use gloss_core::TranslateError;
use tokio_stream::StreamExt;

use crate::transport::map_transport_error;

/// Parse SSE lines from a byte stream and yield JSON data strings.
///
/// - buffers incoming bytes and splits on newlines
/// - extracts the `data: ` payload, skipping comments and empty lines
/// - filters the `[DONE]` marker
/// - processes any unterminated trailing buffer when the stream ends
///
/// A read error on the underlying byte stream is yielded as one `Err` item
/// and ends the stream.
pub fn parse_sse_lines<S>(
    byte_stream: S,
) -> impl Stream<Item = Result<String, TranslateError>> + Send
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Send + Unpin + 'static,
{
    futures::stream::unfold(
        (byte_stream, BytesMut::with_capacity(8192), false),
        move |(mut stream, mut buffer, done)| async move {
            if done {
                return None;
            }

            loop {
                // Check buffer for a complete line (\n)
                if let Some(newline_pos) = buffer.iter().position(|&b| b == b'\n') {
                    // Split the line bytes out of the buffer (zero-copy split)
                    let mut line_bytes = buffer.split_to(newline_pos + 1);
                    // Remove trailing \n
                    line_bytes.truncate(line_bytes.len() - 1);
                    // Remove trailing \r if present
                    if line_bytes.last() == Some(&b'\r') {
                        line_bytes.truncate(line_bytes.len() - 1);
                    }

                    // Convert to &str only for the final line
                    let line = match std::str::from_utf8(&line_bytes) {
                        Ok(s) => s,
                        Err(_) => continue, // skip invalid UTF-8 lines
                    };

                    if let Some(data) = extract_sse_data(line) {
                        return Some((Ok(data), (stream, buffer, false)));
                    }
                    continue;
                }

                // Read next chunk — append raw bytes, no conversion
                match stream.next().await {
                    Some(Ok(chunk)) => {
                        buffer.extend_from_slice(&chunk);
                    }
                    Some(Err(e)) => {
                        return Some((Err(map_transport_error(&e)), (stream, buffer, true)));
                    }
                    None => {
                        // Stream ended — a truncating endpoint may leave a
                        // final unterminated data line in the buffer.
                        if !buffer.is_empty() {
                            let line = match std::str::from_utf8(&buffer) {
                                Ok(s) => s.trim(),
                                Err(_) => return None,
                            };
                            if let Some(data) = extract_sse_data(line) {
                                buffer.clear();
                                return Some((Ok(data), (stream, buffer, true)));
                            }
                        }
                        return None;
                    }
                }
            }
        },
    )
}

/// Extract data payload from an SSE line.
///
/// Returns `Some(data)` for valid data lines, `None` for comments,
/// empty lines, and `[DONE]` markers.
fn extract_sse_data(line: &str) -> Option<String> {
    let trimmed = line.trim();

    // Skip empty lines and comments
    if trimmed.is_empty() || trimmed.starts_with(':') {
        return None;
    }

    // Extract "data: " payload
    let data = trimmed
        .strip_prefix("data: ")
        .or_else(|| trimmed.strip_prefix("data:"))?;

    let data = data.trim();

    // Skip [DONE] marker
    if data == "[DONE]" {
        return None;
    }

    // Skip empty data
    if data.is_empty() {
        return None;
    }

    Some(data.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
