//! Top-level error type shared by the engine and the binary.
//!
//! Per-record telemetry errors never reach this type; they are logged and
//! the record is dropped where they occur.

use core::fmt;

use crate::{StartupError, ValidationError};

/// Error raised while setting the game up: loading configuration, reading
/// files or opening the sensor link.
#[derive(Debug, thiserror::Error)]
pub enum GyroDriveError {
    /// Startup errors (connection, endpoint)
    #[error("Startup error: {0}")]
    Startup(#[from] StartupError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    /// Configuration that could not be decoded
    #[error("Configuration error: {0}")]
    Config(String),

    /// An inner error annotated with the operation that raised it
    #[error("{context}: {source}")]
    Context {
        /// Operation and key/value pairs
        context: ErrorContext,
        /// The wrapped error
        source: Box<GyroDriveError>,
    },
}

impl GyroDriveError {
    /// Category of the innermost error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            GyroDriveError::Startup(_) => ErrorCategory::Startup,
            GyroDriveError::Validation(_) => ErrorCategory::Validation,
            GyroDriveError::Io(_) => ErrorCategory::IO,
            GyroDriveError::Config(_) => ErrorCategory::Config,
            GyroDriveError::Context { source, .. } => source.category(),
        }
    }

    /// Severity of the innermost error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GyroDriveError::Startup(e) => e.severity(),
            GyroDriveError::Validation(e) => e.severity(),
            GyroDriveError::Io(_) | GyroDriveError::Config(_) => ErrorSeverity::Error,
            GyroDriveError::Context { source, .. } => source.severity(),
        }
    }

    /// Create a configuration error with a message.
    pub fn config(msg: impl Into<String>) -> Self {
        GyroDriveError::Config(msg.into())
    }
}

impl From<std::io::Error> for GyroDriveError {
    fn from(e: std::io::Error) -> Self {
        GyroDriveError::Io(e)
    }
}

/// Error category for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Startup errors
    Startup = 1,
    /// Configuration errors
    Config = 2,
    /// I/O errors
    IO = 3,
    /// Validation errors
    Validation = 4,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Startup => write!(f, "Startup"),
            ErrorCategory::Config => write!(f, "Config"),
            ErrorCategory::IO => write!(f, "IO"),
            ErrorCategory::Validation => write!(f, "Validation"),
        }
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, the offending input was dropped
    Warning = 1,
    /// Error, operation failed
    Error = 2,
    /// Critical, the process cannot continue
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Operation name plus key/value details, rendered in front of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// The operation that was being performed
    pub operation: String,
    /// Additional context key-value pairs
    pub context: Vec<(String, String)>,
}

impl ErrorContext {
    /// Create a new error context for an operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            context: Vec::new(),
        }
    }

    /// Add a context key-value pair.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operation)?;
        for (key, value) in &self.context {
            write!(f, ", {key}: {value}")?;
        }
        Ok(())
    }
}

/// Extension trait for adding context to errors.
///
/// The wrapped error keeps its category and severity.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, ctx: ErrorContext) -> Result<T, GyroDriveError>;

    /// Add context with an operation name.
    fn with_context(self, operation: impl Into<String>) -> Result<T, GyroDriveError>;
}

impl<T, E: Into<GyroDriveError>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, ctx: ErrorContext) -> Result<T, GyroDriveError> {
        self.map_err(|e| GyroDriveError::Context {
            context: ctx,
            source: Box::new(e.into()),
        })
    }

    fn with_context(self, operation: impl Into<String>) -> Result<T, GyroDriveError> {
        self.context(ErrorContext::new(operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::Startup.to_string(), "Startup");
        assert_eq!(ErrorCategory::Validation.to_string(), "Validation");
        assert_eq!(ErrorCategory::IO.to_string(), "IO");
    }

    #[test]
    fn test_error_severity_ordering() {
        assert!(ErrorSeverity::Critical > ErrorSeverity::Error);
        assert!(ErrorSeverity::Error > ErrorSeverity::Warning);
        assert!(ErrorSeverity::Warning > ErrorSeverity::Info);
    }

    #[test]
    fn test_error_context() {
        let ctx = ErrorContext::new("read_config")
            .with("path", "gyrodrive.yaml")
            .with("section", "motion");
        assert_eq!(
            ctx.to_string(),
            "read_config, path: gyrodrive.yaml, section: motion"
        );
    }

    #[test]
    fn test_error_category_mapping() {
        let err: GyroDriveError = StartupError::connect_failed("10.0.0.2:5000", "refused").into();
        assert_eq!(err.category(), ErrorCategory::Startup);
        assert_eq!(err.severity(), ErrorSeverity::Critical);

        let err = GyroDriveError::config("bad");
        assert_eq!(err.category(), ErrorCategory::Config);
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_context_keeps_inner_category() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        let Err(err) = result.with_context("read_config") else {
            panic!("expected an error");
        };
        assert_eq!(err.category(), ErrorCategory::IO);
        assert_eq!(err.severity(), ErrorSeverity::Error);
        assert!(err.to_string().starts_with("read_config: I/O error"));
    }

    #[test]
    fn test_nested_context() {
        let inner: std::result::Result<(), ValidationError> =
            Err(ValidationError::required("telemetry.header_marker"));
        let Err(err) = inner
            .with_context("validate")
            .context(ErrorContext::new("load_config").with("path", "game.yaml"))
        else {
            panic!("expected an error");
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(
            err.to_string(),
            "load_config, path: game.yaml: validate: Validation error: \
             Required field 'telemetry.header_marker' is missing"
        );
    }
}
