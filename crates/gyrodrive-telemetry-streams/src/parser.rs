//! CSV record parsing for the sensor logger stream.
//!
//! The logger emits one comma-separated line per sample with a header line
//! at the start of every session. Only three gyroscope columns are read.
//! Device-reported rates are inverted relative to the game's axes, so every
//! extracted value is negated.

use gyrodrive_errors::{TelemetryError, TelemetryResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Token that identifies the logger's header line.
pub const DEFAULT_HEADER_MARKER: &str = "loggingTime";

/// Which channels the stream drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelVariant {
    /// Steering, zoom and forward speed
    #[default]
    Extended,
    /// Steering and zoom only; speed stays constant
    Minimal,
}

/// Zero-based field indices of the three gyroscope channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelLayout {
    /// Field that modulates forward speed (gyro X)
    pub speed: usize,
    /// Field that drives camera zoom (gyro Y)
    pub zoom: usize,
    /// Field that drives lateral steering (gyro Z)
    pub steering: usize,
}

impl Default for ChannelLayout {
    fn default() -> Self {
        Self {
            speed: 25,
            zoom: 26,
            steering: 27,
        }
    }
}

/// One telemetry sample, already sign-corrected.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSample {
    /// Lateral steering rate
    pub steering: f64,
    /// Zoom rate
    pub zoom: f64,
    /// Speed modulation rate; always 0 in the minimal variant
    pub speed: f64,
}

impl RawSample {
    /// Build a sample from its three channel values.
    pub const fn new(steering: f64, zoom: f64, speed: f64) -> Self {
        Self {
            steering,
            zoom,
            speed,
        }
    }

    /// True when every channel holds a finite value.
    pub fn is_finite(&self) -> bool {
        self.steering.is_finite() && self.zoom.is_finite() && self.speed.is_finite()
    }
}

/// Validates records and extracts [`RawSample`]s.
#[derive(Debug, Clone)]
pub struct RecordParser {
    layout: ChannelLayout,
    variant: ChannelVariant,
    header_marker: String,
}

impl RecordParser {
    /// Create a parser for the given layout and variant.
    pub fn new(
        layout: ChannelLayout,
        variant: ChannelVariant,
        header_marker: impl Into<String>,
    ) -> Self {
        Self {
            layout,
            variant,
            header_marker: header_marker.into(),
        }
    }

    /// Channel variant this parser extracts.
    pub fn variant(&self) -> ChannelVariant {
        self.variant
    }

    /// Minimum number of fields a record must have.
    pub fn required_fields(&self) -> usize {
        let highest = match self.variant {
            ChannelVariant::Extended => self
                .layout
                .speed
                .max(self.layout.zoom)
                .max(self.layout.steering),
            ChannelVariant::Minimal => self.layout.zoom.max(self.layout.steering),
        };
        highest + 1
    }

    /// Parse one record.
    ///
    /// Returns `Ok(None)` for blank lines and header lines.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::IncompleteRecord`] when the record has too
    /// few fields and [`TelemetryError::InvalidNumber`] when a required field
    /// is not a finite decimal number. Nothing from a rejected record is kept.
    pub fn parse(&self, record: &str) -> TelemetryResult<Option<RawSample>> {
        if record.trim().is_empty() {
            return Ok(None);
        }
        if !self.header_marker.is_empty() && record.contains(self.header_marker.as_str()) {
            debug!("Ignoring header line");
            return Ok(None);
        }

        let fields: Vec<&str> = record.split(',').collect();
        let required = self.required_fields();
        if fields.len() < required {
            return Err(TelemetryError::incomplete(fields.len(), required));
        }

        let steering = field_value(&fields, self.layout.steering)?;
        let zoom = field_value(&fields, self.layout.zoom)?;
        let speed = match self.variant {
            ChannelVariant::Extended => field_value(&fields, self.layout.speed)?,
            ChannelVariant::Minimal => 0.0,
        };

        Ok(Some(RawSample::new(steering, zoom, speed)))
    }
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new(
            ChannelLayout::default(),
            ChannelVariant::default(),
            DEFAULT_HEADER_MARKER,
        )
    }
}

fn field_value(fields: &[&str], index: usize) -> TelemetryResult<f64> {
    let raw = fields
        .get(index)
        .map(|f| f.trim())
        .ok_or(TelemetryError::incomplete(fields.len(), index + 1))?;
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(-v),
        _ => Err(TelemetryError::invalid_number(index, raw)),
    }
}
