//! Newline framing over a non-blocking byte stream.
//!
//! The socket is polled once per tick, so a single read may carry nothing,
//! half a record, or a dozen records. [`LineFramer`] keeps the trailing
//! partial record between reads and hands out complete records in order.

use gyrodrive_errors::TelemetryError;
use tracing::{debug, warn};

/// Default cap on the buffered partial record, in bytes.
pub const DEFAULT_MAX_RESIDUAL: usize = 64 * 1024;

/// Outcome of one non-blocking poll of the telemetry link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkInput<'a> {
    /// Nothing was available this tick
    Idle,
    /// Newly received bytes
    Bytes(&'a [u8]),
    /// The peer closed the link or the read failed
    Closed,
}

/// Event produced by the framer.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// One complete record, without its terminating newline
    Record(String),
    /// Bytes were thrown away; the stream continues
    Dropped(TelemetryError),
    /// The link is gone
    Disconnected,
}

/// Reassembles newline-terminated records from arbitrary byte chunks.
#[derive(Debug)]
pub struct LineFramer {
    residual: Vec<u8>,
    max_residual: usize,
    resyncing: bool,
}

impl LineFramer {
    /// Create a framer whose partial record may grow to `max_residual` bytes.
    pub fn new(max_residual: usize) -> Self {
        Self {
            residual: Vec::new(),
            max_residual: max_residual.max(1),
            resyncing: false,
        }
    }

    /// Feed the result of one link poll.
    pub fn feed(&mut self, input: LinkInput<'_>) -> Vec<StreamEvent> {
        match input {
            LinkInput::Idle => Vec::new(),
            LinkInput::Bytes(chunk) => self.push(chunk),
            LinkInput::Closed => {
                self.close();
                vec![StreamEvent::Disconnected]
            }
        }
    }

    /// Append a chunk and extract every record it completes.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        let mut segments = chunk.split(|&b| b == b'\n');
        let tail = segments.next_back().unwrap_or_default();

        for line in segments {
            if self.resyncing {
                // The rest of an oversized record; the next one starts clean.
                self.resyncing = false;
                continue;
            }
            self.residual.extend_from_slice(line);
            let record = String::from_utf8_lossy(&self.residual).into_owned();
            self.residual.clear();
            events.push(StreamEvent::Record(record));
        }

        if self.resyncing || tail.is_empty() {
            return events;
        }

        self.residual.extend_from_slice(tail);
        if self.residual.len() > self.max_residual {
            let dropped = self.residual.len();
            warn!(
                dropped,
                max = self.max_residual,
                "Partial record exceeded residual cap, skipping to next newline"
            );
            self.residual.clear();
            self.resyncing = true;
            events.push(StreamEvent::Dropped(TelemetryError::ResidualOverflow {
                dropped,
            }));
        }

        events
    }

    /// Discard any partial record. Returns the number of bytes thrown away.
    pub fn close(&mut self) -> usize {
        let discarded = self.residual.len();
        if discarded > 0 {
            debug!(bytes = discarded, "Discarding partial record on disconnect");
        }
        self.residual.clear();
        self.resyncing = false;
        discarded
    }

    /// Bytes currently held as a partial record.
    pub fn residual_len(&self) -> usize {
        self.residual.len()
    }
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RESIDUAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(events: Vec<StreamEvent>) -> Vec<String> {
        events
            .into_iter()
            .filter_map(|e| match e {
                StreamEvent::Record(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_single_chunk_many_records() {
        let mut framer = LineFramer::default();
        let out = records(framer.push(b"a,1\nb,2\nc,3\n"));
        assert_eq!(out, vec!["a,1", "b,2", "c,3"]);
        assert_eq!(framer.residual_len(), 0);
    }

    #[test]
    fn test_partial_record_carried_over() {
        let mut framer = LineFramer::default();
        assert!(framer.push(b"1,2,").is_empty());
        assert_eq!(framer.residual_len(), 4);
        let out = records(framer.push(b"3\n4,"));
        assert_eq!(out, vec!["1,2,3"]);
        assert_eq!(framer.residual_len(), 2);
    }

    #[test]
    fn test_empty_chunk_is_noop() {
        let mut framer = LineFramer::default();
        assert!(framer.push(b"").is_empty());
        assert!(framer.feed(LinkInput::Idle).is_empty());
    }

    #[test]
    fn test_empty_lines_are_records() {
        let mut framer = LineFramer::default();
        let out = records(framer.push(b"\n\nx\n"));
        assert_eq!(out, vec!["", "", "x"]);
    }

    #[test]
    fn test_closed_reports_disconnect_and_clears() {
        let mut framer = LineFramer::default();
        framer.push(b"partial");
        let events = framer.feed(LinkInput::Closed);
        assert_eq!(events, vec![StreamEvent::Disconnected]);
        assert_eq!(framer.residual_len(), 0);
    }

    #[test]
    fn test_overflow_resyncs_on_next_newline() {
        let mut framer = LineFramer::new(8);
        let events = framer.push(b"0123456789");
        assert_eq!(
            events,
            vec![StreamEvent::Dropped(TelemetryError::ResidualOverflow {
                dropped: 10
            })]
        );
        assert!(framer.resyncing);

        // Tail of the oversized record is skipped, the next record survives.
        assert!(framer.push(b"more junk").is_empty());
        let out = records(framer.push(b"tail\nok\n"));
        assert_eq!(out, vec!["ok"]);
        assert!(!framer.resyncing);
    }
}
