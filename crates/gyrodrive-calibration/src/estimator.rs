//! Resting-bias estimator

use std::time::Instant;

use gyrodrive_telemetry_streams::RawSample;
use tracing::{debug, info, warn};

use crate::{AxisOffsets, CalibrationError, CalibrationResult, CalibrationSettings};

/// Progress of a calibration run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationStatus {
    /// Still collecting samples
    Collecting,
    /// Closed with the given offsets
    Complete(AxisOffsets),
}

/// Accumulates the mean of incoming samples until a threshold closes the run.
///
/// The mean is kept as a running value rather than a raw sum so that a run
/// of identical samples yields exactly that sample as the offset. Each
/// update is a convex step toward the new sample, so finite input keeps the
/// mean finite even near `f64::MAX`.
#[derive(Debug, Clone)]
pub struct CalibrationEstimator {
    settings: CalibrationSettings,
    started_at: Instant,
    mean: AxisOffsets,
    samples: usize,
    result: Option<AxisOffsets>,
}

impl CalibrationEstimator {
    pub fn new(settings: CalibrationSettings, started_at: Instant) -> Self {
        Self {
            settings,
            started_at,
            mean: AxisOffsets::default(),
            samples: 0,
            result: None,
        }
    }

    /// Add one raw sample observed at `now`.
    ///
    /// Samples arriving after the run has closed are ignored. A sample that
    /// would leave the mean non-finite is dropped and not counted.
    pub fn push(&mut self, sample: RawSample, now: Instant) -> CalibrationStatus {
        if let Some(offsets) = self.result {
            return CalibrationStatus::Complete(offsets);
        }

        let n = (self.samples + 1) as f64;
        let mean = AxisOffsets::new(
            step_mean(self.mean.steering, sample.steering, n),
            step_mean(self.mean.zoom, sample.zoom, n),
            step_mean(self.mean.speed, sample.speed, n),
        );
        if !mean.is_finite() {
            warn!(
                steering = sample.steering,
                zoom = sample.zoom,
                speed = sample.speed,
                samples = self.samples,
                "Calibration sample dropped, mean would not be finite"
            );
            return self.poll(now);
        }

        self.samples += 1;
        self.mean = mean;
        self.poll(now)
    }

    /// Check the close condition without adding a sample.
    ///
    /// With no samples the run stays open even after the duration has passed.
    pub fn poll(&mut self, now: Instant) -> CalibrationStatus {
        if let Some(offsets) = self.result {
            return CalibrationStatus::Complete(offsets);
        }
        if self.samples == 0 {
            if self.elapsed_reached(now) {
                debug!("Calibration window elapsed with no samples, still waiting");
            }
            return CalibrationStatus::Collecting;
        }

        if self.samples >= self.settings.max_samples || self.elapsed_reached(now) {
            let offsets = self.mean;
            info!(
                samples = self.samples,
                steering = offsets.steering,
                zoom = offsets.zoom,
                speed = offsets.speed,
                "Calibration complete"
            );
            self.result = Some(offsets);
            return CalibrationStatus::Complete(offsets);
        }

        CalibrationStatus::Collecting
    }

    /// Close the run now and return the mean of what has been seen.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::NotComplete`] if no sample has arrived.
    pub fn finish(&mut self) -> CalibrationResult<AxisOffsets> {
        if let Some(offsets) = self.result {
            return Ok(offsets);
        }
        if self.samples == 0 {
            return Err(CalibrationError::NotComplete);
        }
        self.result = Some(self.mean);
        Ok(self.mean)
    }

    pub fn sample_count(&self) -> usize {
        self.samples
    }

    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    /// Discard all samples and restart the clock at `now`.
    pub fn reset(&mut self, now: Instant) {
        self.started_at = now;
        self.mean = AxisOffsets::default();
        self.samples = 0;
        self.result = None;
    }

    fn elapsed_reached(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.settings.duration()
    }
}

/// Mean of `n` samples given the mean of the first `n - 1` and sample `n`.
///
/// Both terms are divided before they are combined so two finite values of
/// opposite sign near `f64::MAX` cannot overflow.
fn step_mean(mean: f64, sample: f64, n: f64) -> f64 {
    mean + (sample / n - mean / n)
}
