//! Gateway configuration.

use serde::{Deserialize, Serialize};

/// Backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Python session every request is bound to.
///
/// The backend has no authentication; every client shares this literal
/// unless it is overridden in settings.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Where the backend lives and which session the client speaks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base URL of the backend, without the `/api` prefix.
    pub base_url: String,
    /// Python kernel session id.
    pub session_id: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            session_id: DEFAULT_SESSION_ID.to_string(),
        }
    }
}

impl GatewayConfig {
    /// Config pointing at `base_url` with the default session.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Replace the session id.
    #[must_use]
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }
}
