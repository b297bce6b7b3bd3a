//! Telemetry streaming utilities
//!
//! Turns the raw byte stream of a phone sensor logger into [`RawSample`]s.
//!
//! - [`framer`]: reassembles newline-delimited records from arbitrary chunks
//! - [`parser`]: validates one CSV record and extracts the gyroscope channels

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod framer;
pub mod parser;

pub use framer::{DEFAULT_MAX_RESIDUAL, LineFramer, LinkInput, StreamEvent};
pub use parser::{ChannelLayout, ChannelVariant, DEFAULT_HEADER_MARKER, RawSample, RecordParser};

pub use gyrodrive_errors::{TelemetryError, TelemetryResult};
