//! Line framing
//!
//! Incoming bytes are split on `\r\n`. Chunk boundaries need not line up
//! with line boundaries: an unterminated tail is kept until the rest of the
//! line arrives.

use bytes::{Buf, BytesMut};

use super::LINE_DELIMITER;

/// Default cap on a single unterminated line
pub const DEFAULT_MAX_LINE_LENGTH: usize = 64 * 1024;

/// Accumulates incoming chunks and yields complete lines
#[derive(Debug)]
pub struct LineBuffer {
    buf: BytesMut,
    max_line_length: usize,
    discarded: u64,
    // Inside an over-long line; everything up to the next delimiter is dropped
    discarding: bool,
}

impl LineBuffer {
    /// Create a buffer with the default line length cap
    pub fn new() -> Self {
        Self::with_max_line_length(DEFAULT_MAX_LINE_LENGTH)
    }

    /// Create a buffer with a custom line length cap
    pub fn with_max_line_length(max_line_length: usize) -> Self {
        Self {
            buf: BytesMut::new(),
            max_line_length: max_line_length.max(1),
            discarded: 0,
            discarding: false,
        }
    }

    /// Append a chunk and return every line it completes, in order.
    ///
    /// Empty lines are skipped. If the pending tail grows past the line cap
    /// without a delimiter, that whole line is dropped, including whatever
    /// of it arrives later.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = find_delimiter(&self.buf) {
            let line = self.buf.split_to(pos);
            self.buf.advance(LINE_DELIMITER.len());

            if self.discarding {
                self.discarding = false;
                continue;
            }

            if !line.is_empty() {
                lines.push(String::from_utf8_lossy(&line).into_owned());
            }
        }

        if self.buf.len() > self.max_line_length {
            // Keep a trailing '\r' so a delimiter split across reads still matches
            let keep = usize::from(self.buf.last() == Some(&b'\r'));
            let dropped = self.buf.len() - keep;
            self.buf.advance(dropped);

            if !self.discarding {
                self.discarding = true;
                self.discarded += 1;

                tracing::warn!(
                    dropped_bytes = dropped,
                    max_line_length = self.max_line_length,
                    "Discarding over-long line"
                );
            }
        }

        lines
    }

    /// Take whatever unterminated text remains (used at end of stream)
    pub fn finish(&mut self) -> Option<String> {
        let rest = self.buf.split();
        let discarding = std::mem::take(&mut self.discarding);
        if rest.is_empty() || discarding {
            return None;
        }

        Some(String::from_utf8_lossy(&rest).into_owned())
    }

    /// Number of bytes waiting for a delimiter
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Number of over-long lines dropped so far
    pub fn discarded(&self) -> u64 {
        self.discarded
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

fn find_delimiter(buf: &[u8]) -> Option<usize> {
    buf.windows(LINE_DELIMITER.len())
        .position(|w| w == LINE_DELIMITER.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let mut lines = LineBuffer::new();
        assert_eq!(lines.push(b"subscribe: news\r\n"), vec!["subscribe: news"]);
        assert_eq!(lines.pending(), 0);
    }

    #[test]
    fn test_multiple_lines_in_one_chunk() {
        let mut lines = LineBuffer::new();
        let out = lines.push(b"subscribe: a\r\nsubscribe: b\r\nalertNoParam: a\r\n");
        assert_eq!(out, vec!["subscribe: a", "subscribe: b", "alertNoParam: a"]);
    }

    #[test]
    fn test_empty_lines_skipped() {
        let mut lines = LineBuffer::new();
        let out = lines.push(b"\r\n\r\nsubscribe: a\r\n\r\n");
        assert_eq!(out, vec!["subscribe: a"]);
    }

    #[test]
    fn test_partial_line_reassembled() {
        let mut lines = LineBuffer::new();
        assert!(lines.push(b"subscr").is_empty());
        assert!(lines.push(b"ibe: ne").is_empty());
        assert_eq!(lines.push(b"ws\r\nalert"), vec!["subscribe: news"]);
        assert_eq!(lines.pending(), 5);
    }

    #[test]
    fn test_delimiter_split_across_chunks() {
        let mut lines = LineBuffer::new();
        assert!(lines.push(b"subscribe: a\r").is_empty());
        assert_eq!(lines.push(b"\nsubscribe: b\r\n"), vec!["subscribe: a", "subscribe: b"]);
    }

    #[test]
    fn test_bare_newline_is_not_a_delimiter() {
        let mut lines = LineBuffer::new();
        assert!(lines.push(b"subscribe: a\n").is_empty());
        assert_eq!(lines.finish(), Some("subscribe: a\n".to_string()));
    }

    #[test]
    fn test_finish() {
        let mut lines = LineBuffer::new();
        lines.push(b"done\r\ntail");
        assert_eq!(lines.finish(), Some("tail".to_string()));
        assert_eq!(lines.finish(), None);
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        let mut lines = LineBuffer::new();
        let out = lines.push(b"subscribe: \xff\r\n");
        assert_eq!(out, vec!["subscribe: \u{fffd}"]);
    }

    #[test]
    fn test_over_long_line_discarded() {
        let mut lines = LineBuffer::with_max_line_length(8);
        assert!(lines.push(b"0123456789").is_empty());
        assert_eq!(lines.discarded(), 1);
        assert_eq!(lines.pending(), 0);

        // The rest of the dropped line is swallowed, then framing recovers
        let out = lines.push(b"abc\r\nsubscribe: a\r\n");
        assert_eq!(out, vec!["subscribe: a"]);
    }

    #[test]
    fn test_tail_of_over_long_line_never_becomes_a_command() {
        let mut lines = LineBuffer::with_max_line_length(8);
        assert!(lines.push(b"xxxxxxxxxx").is_empty());
        assert!(lines.push(b"subscribe: ").is_empty());
        assert!(lines.push(b"evil").is_empty());
        assert_eq!(lines.discarded(), 1);

        let out = lines.push(b"\r\nalertNoParam: ok\r\n");
        assert_eq!(out, vec!["alertNoParam: ok"]);
    }

    #[test]
    fn test_finish_while_discarding() {
        let mut lines = LineBuffer::with_max_line_length(4);
        lines.push(b"0123456");
        lines.push(b"subscribe: x");

        assert_eq!(lines.finish(), None);
        assert_eq!(lines.pending(), 0);
    }

    #[test]
    fn test_over_long_keeps_trailing_cr() {
        let mut lines = LineBuffer::with_max_line_length(4);
        assert!(lines.push(b"abcdef\r").is_empty());
        assert_eq!(lines.pending(), 1);
        assert!(lines.push(b"\n").is_empty());
        assert_eq!(lines.pending(), 0);
    }
}
