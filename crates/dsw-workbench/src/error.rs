//! Workbench error types.
//!
//! Only explicit user actions (submitting a connection, publishing a
//! variable, running a script) return these. Background refreshes log and
//! keep the last good state instead.

use dsw_gateway::GatewayError;
use thiserror::Error;

/// Errors surfaced by workbench operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WorkbenchError {
    /// A backend call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A form field failed validation before anything was sent.
    #[error("{field}: {reason}")]
    Validation {
        /// Field that failed.
        field: &'static str,
        /// Why it failed.
        reason: String,
    },

    /// Run was requested with no script selected.
    #[error("no script is active")]
    NoActiveScript,

    /// Settings could not be written.
    #[error("settings error: {reason}")]
    Settings {
        /// Description of what went wrong.
        reason: String,
    },
}

impl WorkbenchError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Text suitable for an inline error message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Gateway(err) => err.user_message(),
            Self::Validation { reason, .. } => reason.clone(),
            Self::NoActiveScript => "Select a script or create new.".to_string(),
            Self::Settings { reason } => format!("Could not save settings: {reason}"),
        }
    }
}

/// Result type alias for workbench operations.
pub type Result<T> = std::result::Result<T, WorkbenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_message_passes_through() {
        let err = WorkbenchError::from(GatewayError::Status {
            status: 400,
            detail: "Access denied for user".to_string(),
        });
        assert_eq!(err.user_message(), "Access denied for user");
        assert_eq!(err.to_string(), "backend returned 400: Access denied for user");
    }

    #[test]
    fn test_validation_display() {
        let err = WorkbenchError::validation("port", "Port must be a number");
        assert_eq!(err.to_string(), "port: Port must be a number");
        assert_eq!(err.user_message(), "Port must be a number");
    }
}
