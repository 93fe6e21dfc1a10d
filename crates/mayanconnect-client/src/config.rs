//! Document API connection settings.

use serde::{Deserialize, Serialize};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the Mayan document API.
///
/// Both `api_url` and `api_token` must be set for a client to be built;
/// without them the document routes report the API as unconfigured.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MayanConfig {
    /// Base API URL, e.g. `http://mayan:8000/api/v4`.
    pub api_url: Option<String>,
    /// API token sent as `Authorization: Token <token>`.
    pub api_token: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for MayanConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl MayanConfig {
    /// Returns `true` if both URL and token are present and non-empty.
    pub fn is_complete(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.api_url) && present(&self.api_token)
    }
}
