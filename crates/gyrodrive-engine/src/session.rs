//! Per-run simulation state
//!
//! Everything a run mutates lives in one [`Session`]. Starting or retrying
//! a run goes through [`Session::reset`] and nothing else.

use std::time::Instant;

use gyrodrive_calibration::{AxisOffsets, CalibrationEstimator};
use gyrodrive_filters::{AxisSmoother, ControlSignal, FilterState};

use crate::config::GameConfig;
use crate::geometry::Layout;
use crate::motion::CarState;
use crate::obstacles::ObstacleSet;

#[derive(Debug, Clone)]
pub struct Session {
    pub calibration: CalibrationEstimator,
    /// Set once calibration closes.
    pub offsets: Option<AxisOffsets>,
    pub smoother: AxisSmoother,
    /// Latest filtered signal; held between samples.
    pub signal: ControlSignal,
    pub car: CarState,
    pub obstacles: ObstacleSet,
    /// Seconds of play in this run.
    pub score: f64,
    /// Instant of the previous motion update.
    pub last_update: Instant,
}

impl Session {
    pub fn new(config: &GameConfig, layout: &Layout, now: Instant) -> Self {
        Self {
            calibration: CalibrationEstimator::new(config.calibration, now),
            offsets: None,
            smoother: AxisSmoother::new(config.smoothing.window, config.smoothing.limit),
            signal: ControlSignal::default(),
            car: CarState::new(layout, &config.motion),
            obstacles: ObstacleSet::new(&config.obstacle, layout),
            score: 0.0,
            last_update: now,
        }
    }

    /// Return to the start-of-run state with the calibration clock at `now`.
    pub fn reset(&mut self, config: &GameConfig, layout: &Layout, now: Instant) {
        self.calibration.reset(now);
        self.offsets = None;
        self.smoother.reset();
        self.signal = ControlSignal::default();
        self.car = CarState::new(layout, &config.motion);
        self.obstacles.clear();
        self.score = 0.0;
        self.last_update = now;
    }

    /// Seconds since the previous motion update, advancing the clock.
    pub fn take_dt(&mut self, now: Instant) -> f64 {
        let dt = now.saturating_duration_since(self.last_update).as_secs_f64();
        self.last_update = self.last_update.max(now);
        dt
    }
}
