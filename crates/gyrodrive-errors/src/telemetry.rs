//! Telemetry stream error types.
//!
//! Every variant here describes a single dropped record or partial line.
//! None of them stop the game loop. A closed link is not an error; the
//! framer reports it as a stream event.

/// Errors raised while framing or parsing the sensor stream.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TelemetryError {
    /// The record has too few comma-separated fields
    #[error("Incomplete data line: {fields} fields, need at least {required}")]
    IncompleteRecord {
        /// Number of fields found
        fields: usize,
        /// Minimum number of fields needed
        required: usize,
    },

    /// A required field did not parse as a decimal number
    #[error("Invalid gyroscope value at field {index}: '{value}'")]
    InvalidNumber {
        /// Zero-based field index
        index: usize,
        /// Offending text, trimmed
        value: String,
    },

    /// The partial record grew past the residual cap and was discarded
    #[error("Residual buffer overflow: dropped {dropped} bytes")]
    ResidualOverflow {
        /// Number of bytes thrown away
        dropped: usize,
    },
}

impl TelemetryError {
    /// Create an incomplete record error.
    pub fn incomplete(fields: usize, required: usize) -> Self {
        TelemetryError::IncompleteRecord { fields, required }
    }

    /// Create an invalid number error.
    pub fn invalid_number(index: usize, value: impl Into<String>) -> Self {
        TelemetryError::InvalidNumber {
            index,
            value: value.into(),
        }
    }
}
