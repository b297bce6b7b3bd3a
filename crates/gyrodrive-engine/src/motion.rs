//! Motion and camera control
//!
//! Applied once per tick with the elapsed time since the previous tick.
//! All three outputs are clamped, never wrapped.

use gyrodrive_filters::ControlSignal;
use serde::Serialize;

use crate::config::MotionConfig;
use crate::geometry::{Layout, Rect};

/// Car position, speed and camera zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CarState {
    /// Car rectangle in screen space.
    pub rect: Rect,
    /// Forward speed in pixels per second.
    pub speed: f64,
    /// Camera zoom; 1.0 is the default view, larger values zoom out.
    pub zoom: f64,
}

impl CarState {
    pub fn new(layout: &Layout, motion: &MotionConfig) -> Self {
        Self {
            rect: layout.car_start,
            speed: motion.initial_speed,
            zoom: 1.0,
        }
    }
}

/// Integrates the filtered control signal into [`CarState`].
#[derive(Debug, Clone, Copy)]
pub struct MotionController {
    config: MotionConfig,
    min_x: f64,
    max_x: f64,
}

impl MotionController {
    pub fn new(config: MotionConfig, layout: &Layout) -> Self {
        Self {
            config,
            min_x: layout.car_min_x(),
            max_x: layout.car_max_x(),
        }
    }

    /// Advance the car by `dt` seconds.
    pub fn step(&self, car: &mut CarState, signal: ControlSignal, dt: f64) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        car.rect.x = self.steer(car.rect.x, signal.steering, dt);
        car.zoom = self.zoom(car.zoom, signal.zoom, dt);
        car.speed = self.speed(car.speed, signal.speed, dt);
    }

    /// New lateral position, kept on the road.
    pub fn steer(&self, x: f64, steering: f64, dt: f64) -> f64 {
        let moved = x + steering * self.config.steering_scale * dt;
        clamp(moved, self.min_x, self.max_x)
    }

    /// New zoom factor, kept within the configured bounds.
    pub fn zoom(&self, zoom: f64, input: f64, dt: f64) -> f64 {
        let next = zoom + input * self.config.zoom_speed * dt;
        clamp(next, self.config.min_zoom, self.config.max_zoom)
    }

    /// New forward speed.
    ///
    /// Inside the dead band the speed is held. Outside it the speed changes
    /// in proportion to the signal magnitude relative to full scale.
    pub fn speed(&self, speed: f64, input: f64, dt: f64) -> f64 {
        let c = &self.config;
        let magnitude = input.abs() / c.speed_full_scale;
        let next = if input > c.speed_dead_band {
            speed + magnitude * c.acceleration * dt
        } else if input < -c.speed_dead_band {
            speed - magnitude * c.deceleration * dt
        } else {
            speed
        };
        clamp(next, c.min_speed, c.max_speed)
    }
}

/// Clamp that never panics; NaN collapses to `lo`.
fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        return lo;
    }
    value.max(lo).min(hi)
}
