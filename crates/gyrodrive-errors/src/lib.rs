//! Centralized error types for GyroDrive
//!
//! This crate provides the error taxonomy shared by the telemetry pipeline,
//! the game engine and the `gyrodrive` binary.
//!
//! # Architecture
//!
//! - [`common`]: Top-level error type, classification and context helpers
//! - [`telemetry`]: Recoverable per-record errors (dropped sample or partial line)
//! - [`startup`]: Fatal errors raised before the game loop starts
//! - [`validation`]: Configuration validation errors
//!
//! # Recoverability
//!
//! Nothing in the steady-state pipeline is fatal. A [`TelemetryError`] costs
//! one record and is logged where it happens; it is never wrapped in
//! [`GyroDriveError`]. [`StartupError`] values are critical and only occur
//! before the first tick.
//!
//! # Example
//!
//! ```
//! use gyrodrive_errors::prelude::*;
//!
//! fn check_window(len: usize) -> Result<usize> {
//!     if len == 0 {
//!         return Err(ValidationError::constraint("smoothing window must not be empty").into());
//!     }
//!     Ok(len)
//! }
//!
//! assert!(check_window(0).is_err());
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod prelude;
pub mod startup;
pub mod telemetry;
pub mod validation;

pub use common::{ErrorCategory, ErrorContext, ErrorSeverity, GyroDriveError, ResultExt};
pub use startup::StartupError;
pub use telemetry::TelemetryError;
pub use validation::ValidationError;

/// A specialized `Result` type for GyroDrive operations.
pub type Result<T> = std::result::Result<T, GyroDriveError>;

/// A specialized `Result` type for per-record telemetry handling.
pub type TelemetryResult<T> = std::result::Result<T, TelemetryError>;
