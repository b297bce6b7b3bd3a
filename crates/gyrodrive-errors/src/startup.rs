//! Startup error types.
//!
//! These are fatal: the process exits before the game loop starts.

use crate::ErrorSeverity;

/// Errors raised before the first tick.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StartupError {
    /// Host or port could not be turned into a socket address
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        /// Endpoint as given on the command line
        endpoint: String,
        /// Why it was rejected
        reason: String,
    },

    /// The TCP connection attempt failed
    #[error("Failed to connect to {endpoint}: {reason}")]
    ConnectFailed {
        /// Endpoint that was dialled
        endpoint: String,
        /// Underlying cause
        reason: String,
    },

    /// The TCP connection attempt did not complete in time
    #[error("Timed out after {timeout_ms}ms connecting to {endpoint}")]
    ConnectTimeout {
        /// Endpoint that was dialled
        endpoint: String,
        /// Timeout that elapsed
        timeout_ms: u64,
    },
}

impl StartupError {
    /// Create an invalid endpoint error.
    pub fn invalid_endpoint(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        StartupError::InvalidEndpoint {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Create a connection failure error.
    pub fn connect_failed(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        StartupError::ConnectFailed {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Create a connection timeout error.
    pub fn connect_timeout(endpoint: impl Into<String>, timeout_ms: u64) -> Self {
        StartupError::ConnectTimeout {
            endpoint: endpoint.into(),
            timeout_ms,
        }
    }

    /// Get the severity of this error.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Critical
    }
}
