//! Prelude for the filters crate.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! # Example
//!
//! ```
//! use gyrodrive_filters::prelude::*;
//!
//! let mut smoother = AxisSmoother::default();
//! smoother.reset();
//! assert_eq!(smoother.output(), ControlSignal::default());
//! ```

pub use crate::axes::{AxisSmoother, ControlSignal};
pub use crate::smoothing::{SmoothingWindow, smoothing_filter};
pub use crate::state::FilterState;
