//! Incremental server-sent events decoder
//!
//! Completion replies arrive as a `text/event-stream` body split into
//! arbitrary byte chunks. [`SseDecoder`] buffers those chunks and yields one
//! [`SseEvent`] per blank-line-terminated event block.
//!
//! Field handling:
//!
//! - `data:` -- appended to the event payload; multiple lines are joined with `\n`
//! - `event:` -- stored as the event type
//! - `id:` and `retry:` -- ignored
//! - lines starting with `:` -- comments (keep-alives), ignored
//!
//! Events without any data are dropped.

/// One decoded server-sent event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// Value of the `event:` field, if present
    pub event: Option<String>,
    /// Joined `data:` payload
    pub data: String,
}

/// Buffering decoder for a server-sent events byte stream
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    /// Create an empty decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk of bytes and return every event it completes
    ///
    /// # Examples
    ///
    /// ```
    /// use careerbot::providers::sse::SseDecoder;
    ///
    /// let mut decoder = SseDecoder::new();
    /// assert!(decoder.push(b"data: hel").is_empty());
    /// let events = decoder.push(b"lo\n\n");
    /// assert_eq!(events[0].data, "hello");
    /// ```
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        // CR only ever appears in line terminators.
        self.buffer.extend(chunk.iter().copied().filter(|b| *b != b'\r'));

        let mut events = Vec::new();
        while let Some(pos) = find_double_newline(&self.buffer) {
            let block: Vec<u8> = self.buffer.drain(..pos + 2).collect();
            if let Some(event) = parse_event_block(&String::from_utf8_lossy(&block)) {
                events.push(event);
            }
        }
        events
    }

    /// Flush a trailing event that was not terminated by a blank line
    pub fn finish(&mut self) -> Option<SseEvent> {
        if self.buffer.is_empty() {
            return None;
        }
        let block = std::mem::take(&mut self.buffer);
        parse_event_block(&String::from_utf8_lossy(&block))
    }
}

fn find_double_newline(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\n\n")
}

fn parse_event_block(block: &str) -> Option<SseEvent> {
    let mut data_lines: Vec<&str> = Vec::new();
    let mut event_type: Option<&str> = None;

    for line in block.lines() {
        if let Some(value) = line.strip_prefix("data:") {
            data_lines.push(value.strip_prefix(' ').unwrap_or(value));
        } else if let Some(value) = line.strip_prefix("event:") {
            event_type = Some(value.trim());
        }
    }

    if data_lines.is_empty() {
        return None;
    }

    Some(SseEvent {
        event: event_type.map(str::to_string),
        data: data_lines.join("\n"),
    })
}
