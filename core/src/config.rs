//! Client configuration.
//!
//! There is a single recognized option, the backend origin. Clients are
//! constructed explicitly from a `ClientConfig`; nothing here is global.

use serde::{Deserialize, Serialize};

/// Environment variable read by `ClientConfig::from_env`.
pub const BACKEND_BASE_URL_ENV: &str = "BACKEND_BASE_URL";

/// Path of the interaction resource, appended to the backend origin.
pub const RESOURCE_PATH: &str = "/api/v1/interaction";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Backend origin, e.g. `https://example.com`. Empty means requests are
    /// relative to the host's own origin.
    #[serde(default)]
    pub backend_base_url: String,
}

impl ClientConfig {
    pub fn new(backend_base_url: impl Into<String>) -> Self {
        Self {
            backend_base_url: backend_base_url.into(),
        }
    }

    /// Read the origin from `BACKEND_BASE_URL`, falling back to empty.
    pub fn from_env() -> Self {
        Self::new(std::env::var(BACKEND_BASE_URL_ENV).unwrap_or_default())
    }

    /// Full base URL of the resource: origin plus `/api/v1/interaction`.
    pub fn resource_url(&self) -> String {
        format!(
            "{}{RESOURCE_PATH}",
            self.backend_base_url.trim_end_matches('/')
        )
    }
}
