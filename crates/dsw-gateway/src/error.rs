//! Error types for backend calls.

use thiserror::Error;

/// Message shown when the backend cannot be reached at all.
pub const NETWORK_ERROR_MESSAGE: &str = "Network Error: Failed to reach backend";

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {detail}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// `detail` field of the error body, or the raw body text.
        detail: String,
    },

    /// The response body was not the expected JSON.
    #[error("malformed backend response: {0}")]
    Decode(String),

    /// The configured base URL cannot be used.
    #[error("invalid backend URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl GatewayError {
    /// Text suitable for an inline error message next to the control that failed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            Self::Status { detail, .. } => detail.clone(),
            Self::Decode(_) => "Unexpected response from backend.".to_string(),
            Self::InvalidBaseUrl { url, .. } => format!("Backend URL '{url}' is not valid."),
        }
    }

    /// Whether the failure happened below HTTP (connection refused, DNS, reset).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// HTTP status code, if the backend answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = GatewayError::Network("connection refused".to_string());
        assert_eq!(err.user_message(), NETWORK_ERROR_MESSAGE);

        let err = GatewayError::Status {
            status: 400,
            detail: "Unsupported database type: foo".to_string(),
        };
        assert_eq!(err.user_message(), "Unsupported database type: foo");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_transport_classification() {
        assert!(GatewayError::Network("reset".to_string()).is_transport());
        assert!(
            !GatewayError::Status {
                status: 500,
                detail: "boom".to_string()
            }
            .is_transport()
        );
        assert!(!GatewayError::Decode("eof".to_string()).is_transport());
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let err: GatewayError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, GatewayError::Decode(_)));
    }
}
