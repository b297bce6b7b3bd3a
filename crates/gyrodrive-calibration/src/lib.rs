//! Gyroscope calibration utilities
//!
//! A phone lying still still reports a small angular rate on every axis.
//! The [`CalibrationEstimator`] averages the first samples of a run into an
//! [`AxisOffsets`] value that is subtracted from every later sample.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod estimator;
pub mod types;

pub use estimator::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    #[error("Calibration not complete")]
    NotComplete,
}

pub type CalibrationResult<T> = Result<T, CalibrationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_types() {
        let err = CalibrationError::NotComplete;
        assert_eq!(format!("{err}"), "Calibration not complete");
    }
}
