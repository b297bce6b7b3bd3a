//! Filter State Types
//!
//! This module aggregates all filter state types for convenient access.

pub use crate::axes::AxisSmoother;
pub use crate::smoothing::SmoothingWindow;

/// Filter trait for common filter operations.
///
/// All filter states implement this trait for a consistent interface.
pub trait FilterState: Copy + Clone + std::fmt::Debug {
    /// Reset the filter state to initial values.
    fn reset(&mut self);
}

impl FilterState for SmoothingWindow {
    fn reset(&mut self) {
        *self = SmoothingWindow::new(self.capacity(), self.limit());
    }
}

impl FilterState for AxisSmoother {
    fn reset(&mut self) {
        self.steering.reset();
        self.zoom.reset();
        self.speed.reset();
    }
}
