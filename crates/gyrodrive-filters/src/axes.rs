//! Per-axis smoothing
//!
//! Each tracked axis gets its own [`SmoothingWindow`]; no state is shared
//! between axes.

use gyrodrive_telemetry_streams::RawSample;
use serde::{Deserialize, Serialize};

use crate::smoothing::{SmoothingWindow, smoothing_filter};

/// Filtered control values consumed by the motion controller.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlSignal {
    /// Lateral steering input
    pub steering: f64,
    /// Camera zoom input
    pub zoom: f64,
    /// Forward speed input
    pub speed: f64,
}

/// Three independent smoothing windows, one per axis.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct AxisSmoother {
    /// Steering axis window
    pub steering: SmoothingWindow,
    /// Zoom axis window
    pub zoom: SmoothingWindow,
    /// Speed axis window
    pub speed: SmoothingWindow,
}

impl AxisSmoother {
    /// Create a smoother whose windows share capacity and limit.
    pub fn new(capacity: usize, limit: f64) -> Self {
        let window = SmoothingWindow::new(capacity, limit);
        Self {
            steering: window,
            zoom: window,
            speed: window,
        }
    }

    /// Push one calibrated sample into every window.
    pub fn apply(&mut self, sample: RawSample) -> ControlSignal {
        ControlSignal {
            steering: smoothing_filter(sample.steering, &mut self.steering),
            zoom: smoothing_filter(sample.zoom, &mut self.zoom),
            speed: smoothing_filter(sample.speed, &mut self.speed),
        }
    }

    /// Current output without adding a sample.
    pub fn output(&self) -> ControlSignal {
        ControlSignal {
            steering: self.steering.output(),
            zoom: self.zoom.output(),
            speed: self.speed.output(),
        }
    }
}

impl Default for AxisSmoother {
    fn default() -> Self {
        Self {
            steering: SmoothingWindow::default(),
            zoom: SmoothingWindow::default(),
            speed: SmoothingWindow::default(),
        }
    }
}
