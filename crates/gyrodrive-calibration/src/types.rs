//! Calibration type definitions

use std::time::Duration;

use gyrodrive_telemetry_streams::RawSample;
use serde::{Deserialize, Serialize};

/// When a calibration run closes.
///
/// Whichever threshold is reached first wins.
///
/// # Examples
///
/// ```
/// use gyrodrive_calibration::CalibrationSettings;
///
/// let settings = CalibrationSettings::default();
/// assert_eq!(settings.max_samples, 100);
/// assert!((settings.duration_secs - 2.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationSettings {
    /// Wall-clock length of the calibration window, in seconds.
    pub duration_secs: f64,
    /// Sample count that closes the window early.
    pub max_samples: usize,
}

impl CalibrationSettings {
    /// The duration threshold as a [`Duration`].
    ///
    /// Negative or non-finite values collapse to zero.
    pub fn duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.duration_secs).unwrap_or(Duration::ZERO)
    }
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            duration_secs: 2.0,
            max_samples: 100,
        }
    }
}

/// Per-axis resting bias.
///
/// Subtracted from every raw sample once calibration has closed.
///
/// # Examples
///
/// ```
/// use gyrodrive_calibration::AxisOffsets;
/// use gyrodrive_telemetry_streams::RawSample;
///
/// let offsets = AxisOffsets::new(0.5, -0.25, 0.0);
/// let calibrated = offsets.apply(RawSample::new(1.5, 0.75, 2.0));
/// assert_eq!(calibrated, RawSample::new(1.0, 1.0, 2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisOffsets {
    /// Steering axis bias
    pub steering: f64,
    /// Zoom axis bias
    pub zoom: f64,
    /// Speed axis bias
    pub speed: f64,
}

impl AxisOffsets {
    /// Creates offsets from explicit per-axis values.
    pub const fn new(steering: f64, zoom: f64, speed: f64) -> Self {
        Self {
            steering,
            zoom,
            speed,
        }
    }

    /// True when every axis holds a finite bias.
    pub fn is_finite(&self) -> bool {
        self.steering.is_finite() && self.zoom.is_finite() && self.speed.is_finite()
    }

    /// Subtract the bias from a raw sample.
    ///
    /// Large opposite-signed values can overflow; callers check
    /// [`RawSample::is_finite`] on the result.
    pub fn apply(&self, sample: RawSample) -> RawSample {
        RawSample::new(
            sample.steering - self.steering,
            sample.zoom - self.zoom,
            sample.speed - self.speed,
        )
    }
}
