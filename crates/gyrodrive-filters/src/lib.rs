//! Smoothing Filters for GyroDrive
//!
//! This crate turns calibrated gyroscope samples into bounded control
//! signals. Every filter runs once per received sample inside the game tick.
//!
//! # Overview
//!
//! - **Smoothing**: fixed-capacity moving average with an output clamp
//! - **Axes**: one smoothing window per tracked axis, producing a [`ControlSignal`]
//!
//! # Allocation Guarantees
//!
//! - Window storage is an inline array, no heap allocation after construction
//! - Bounded execution time: at most [`MAX_WINDOW`] additions per sample
//! - All state types are `Copy` and `#[repr(C)]`
//!
//! # Example
//!
//! ```
//! use gyrodrive_filters::prelude::*;
//!
//! let mut window = SmoothingWindow::new(10, 10.0);
//! smoothing_filter(4.0, &mut window);
//! let out = smoothing_filter(2.0, &mut window);
//! assert!((out - 3.0).abs() < 1e-12);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod axes;
pub mod prelude;
pub mod smoothing;
pub mod state;

pub use axes::{AxisSmoother, ControlSignal};
pub use smoothing::{
    DEFAULT_OUTPUT_LIMIT, DEFAULT_WINDOW, MAX_WINDOW, SmoothingWindow, smoothing_filter,
};
pub use state::FilterState;
