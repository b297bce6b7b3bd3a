//! Prelude module for convenient error handling imports.
//!
//! # Example
//!
//! ```
//! use gyrodrive_errors::prelude::*;
//! use gyrodrive_errors::validate;
//!
//! fn check_window(window: usize) -> Result<()> {
//!     validate!(window > 0, ValidationError::required("smoothing.window"));
//!     Ok(())
//! }
//!
//! assert!(check_window(10).is_ok());
//! assert!(check_window(0).is_err());
//! ```

pub use crate::{
    Result, TelemetryResult,
    common::{ErrorCategory, ErrorContext, ErrorSeverity, GyroDriveError, ResultExt},
    startup::StartupError,
    telemetry::TelemetryError,
    validation::ValidationError,
};

/// Macro for creating an error with context.
///
/// # Example
///
/// ```
/// use gyrodrive_errors::prelude::*;
/// use gyrodrive_errors::error_context;
///
/// let ctx = error_context!("load_config", "file" => "gyrodrive.yaml");
/// assert!(ctx.to_string().contains("gyrodrive.yaml"));
/// ```
#[macro_export]
macro_rules! error_context {
    ($operation:expr, $($key:expr => $value:expr),* $(,)?) => {
        {
            let mut ctx = $crate::ErrorContext::new($operation);
            $(
                ctx = ctx.with($key, $value);
            )*
            ctx
        }
    };
}

/// Return early with `$error` unless `$condition` holds.
#[macro_export]
macro_rules! validate {
    ($condition:expr, $error:expr) => {
        if !$condition {
            return Err($error.into());
        }
    };
}

/// Macro for creating a required field validation error.
#[macro_export]
macro_rules! require {
    ($field:expr) => {
        $crate::ValidationError::required($field)
    };
}

/// Return early with an out of range error unless `$min <= $value <= $max`.
///
/// NaN never satisfies the range.
#[macro_export]
macro_rules! validate_range {
    ($field:expr, $value:expr, $min:expr, $max:expr) => {
        if !($value >= $min && $value <= $max) {
            return Err($crate::ValidationError::out_of_range($field, $value, $min, $max).into());
        }
    };
}
