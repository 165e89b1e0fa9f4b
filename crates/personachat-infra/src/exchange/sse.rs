//! Server-sent-event decoding for streamed generation responses.
//!
//! The response body arrives as arbitrary byte chunks. Lines are buffered
//! across chunks (a line, or even a UTF-8 character, may be split between
//! two reads) and only complete lines are interpreted:
//!
//! 1. `data:` lines carry a JSON payload (one optional space after the colon)
//! 2. `data: [DONE]` ends the stream early
//! 3. Every other line (`event:`, `id:`, comments, blanks) is ignored
//!
//! Payloads that are not valid JSON, or that carry no text fragment, are
//! skipped without affecting the text accumulated so far.

use std::fmt::Display;

use futures_util::{Stream, StreamExt};
use personachat_types::error::ExchangeError;
use tracing::debug;

use super::types::GenerateContentChunk;

const DONE_SENTINEL: &str = "[DONE]";

/// Splits a byte stream into text lines, holding back any partial line.
#[derive(Debug, Default)]
pub struct LineDecoder {
    buffer: Vec<u8>,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return every line it completed, without the
    /// trailing `\n` or `\r\n`.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            lines.push(decode_line(&line[..line.len() - 1]));
        }
        lines
    }

    /// Return the unterminated remainder at end of stream, if any.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.buffer);
        Some(decode_line(&rest))
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// The payload of a `data:` line, or None for any other line.
pub fn data_payload(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("data:")?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

/// Accumulates text fragments from SSE lines in delivery order.
#[derive(Debug, Default)]
pub struct TextAccumulator {
    text: String,
    done: bool,
}

impl TextAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpret one complete line.
    pub fn feed_line(&mut self, line: &str) {
        if self.done {
            return;
        }
        let Some(payload) = data_payload(line) else {
            return;
        };
        if payload.trim() == DONE_SENTINEL {
            self.done = true;
            return;
        }

        match serde_json::from_str::<GenerateContentChunk>(payload) {
            Ok(chunk) => match chunk.into_text() {
                Some(fragment) => self.text.push_str(&fragment),
                None => debug!("Stream chunk carried no text fragment"),
            },
            Err(e) => debug!(error = %e, "Skipping unparseable stream chunk"),
        }
    }

    /// True once the `[DONE]` sentinel has been seen.
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Read a byte stream to completion and return the accumulated text.
///
/// Returns an empty string when the stream carried no fragments; a read
/// error aborts with [`ExchangeError::Stream`].
pub async fn collect_text<S, B, E>(stream: S) -> Result<String, ExchangeError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
{
    let mut stream = std::pin::pin!(stream);
    let mut decoder = LineDecoder::new();
    let mut accumulator = TextAccumulator::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| ExchangeError::Stream(e.to_string()))?;
        for line in decoder.push(chunk.as_ref()) {
            accumulator.feed_line(&line);
        }
        if accumulator.is_done() {
            return Ok(accumulator.into_text());
        }
    }

    if let Some(line) = decoder.finish() {
        accumulator.feed_line(&line);
    }

    Ok(accumulator.into_text())
}
