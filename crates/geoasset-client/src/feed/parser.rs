//! SSE (Server-Sent Events) parser
//!
//! Parses the SSE wire format into store events.

use bytes::Bytes;
use geoasset_core::StoreEvent;
use tracing::trace;

use super::{FeedError, FeedResult};

/// SSE parser state
#[derive(Debug, Default)]
pub struct SseParser {
    /// Buffer for incomplete lines
    buffer: Vec<u8>,
    /// Current event data being accumulated
    data_buffer: String,
    /// Current event name (if any)
    event_type: Option<String>,
}

impl SseParser {
    /// Create a new SSE parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed bytes into the parser and extract any complete events
    pub fn feed(&mut self, bytes: Bytes) -> Vec<FeedResult<StoreEvent>> {
        let mut events = Vec::new();

        self.buffer.extend_from_slice(&bytes);

        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = &line[..line.len() - 1];

            // Handle \r\n line endings
            let line = line.strip_suffix(b"\r").unwrap_or(line);

            if let Some(event) = self.process_line(line) {
                events.push(event);
            }
        }

        events
    }

    /// Process a single line of SSE data
    fn process_line(&mut self, line: &[u8]) -> Option<FeedResult<StoreEvent>> {
        // Empty line signals end of event
        if line.is_empty() {
            return self.dispatch_event();
        }

        // Comment line (keepalive)
        if line.starts_with(b":") {
            trace!("SSE keepalive/comment");
            return None;
        }

        let line_str = match std::str::from_utf8(line) {
            Ok(s) => s,
            Err(_) => {
                return Some(Err(FeedError::Parse("Invalid UTF-8 in SSE line".into())));
            }
        };

        // Split on first colon; a field with no colon has an empty value
        let (field, value) = match line_str.split_once(':') {
            Some((f, v)) => (f, v.strip_prefix(' ').unwrap_or(v)),
            None => (line_str, ""),
        };

        match field {
            "data" => {
                // Multiple data lines are joined with newlines
                if !self.data_buffer.is_empty() {
                    self.data_buffer.push('\n');
                }
                self.data_buffer.push_str(value);
            }
            "event" => {
                self.event_type = Some(value.to_string());
            }
            _ => {
                // id, retry and unknown fields are not used
                trace!("SSE field ignored: {}", field);
            }
        }

        None
    }

    /// Dispatch the accumulated event
    fn dispatch_event(&mut self) -> Option<FeedResult<StoreEvent>> {
        if self.data_buffer.is_empty() {
            return None;
        }

        let data = std::mem::take(&mut self.data_buffer);
        let event_type = self.event_type.take();

        match serde_json::from_str::<StoreEvent>(&data) {
            Ok(event) => Some(Ok(event)),
            Err(e) => Some(Err(FeedError::Parse(format!(
                "Failed to parse {} event: {} (data: {})",
                event_type.as_deref().unwrap_or("message"),
                e,
                preview(&data)
            )))),
        }
    }
}

fn preview(data: &str) -> String {
    match data.char_indices().nth(100) {
        Some((idx, _)) => format!("{}...", &data[..idx]),
        None => data.to_string(),
    }
}
