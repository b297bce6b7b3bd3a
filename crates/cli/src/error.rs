//! Error types for the gyrodrive binary

use gyrodrive_errors::{GyroDriveError, StartupError};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Startup(#[from] StartupError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<GyroDriveError> for CliError {
    fn from(err: GyroDriveError) -> Self {
        debug!(category = %err.category(), severity = %err.severity(), "Startup aborted");
        match err {
            GyroDriveError::Startup(e) => CliError::Startup(e),
            other => CliError::InvalidConfiguration(other.to_string()),
        }
    }
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Startup(_) => 5,
            CliError::InvalidConfiguration(_) => 4,
            CliError::IoError(_) | CliError::JsonError(_) => 1,
        }
    }
}
