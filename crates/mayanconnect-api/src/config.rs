//! Server configuration.
//!
//! Resolution order: built-in defaults, then the optional TOML file, then
//! command-line / environment overrides.
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:3000"
//!
//! [mayan]
//! api_url = "http://mayan:8000/api/v4"
//! api_token = "..."
//! timeout_secs = 30
//!
//! [identity]
//! header = "x-username"
//! anonymous = "anonymous"
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

use mayanconnect_auth::IdentityConfig;
use mayanconnect_client::MayanConfig;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default listen address.
pub const DEFAULT_BIND: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000);

/// Listener settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: DEFAULT_BIND }
    }
}

/// Complete server configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Listener settings.
    pub server: ServerConfig,
    /// Document API connection.
    pub mayan: MayanConfig,
    /// Caller resolution.
    pub identity: IdentityConfig,
}

/// Values that take precedence over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    /// Listen address.
    pub bind: Option<SocketAddr>,
    /// Document API base URL.
    pub mayan_api_url: Option<String>,
    /// Document API token.
    pub mayan_api_token: Option<String>,
}

impl Config {
    /// Load the config file at `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|message| Error::ConfigParse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse a config from TOML text.
    pub fn from_toml(content: &str) -> std::result::Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Apply command-line / environment overrides.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(bind) = overrides.bind {
            self.server.bind = bind;
        }
        if let Some(url) = overrides.mayan_api_url {
            self.mayan.api_url = Some(url);
        }
        if let Some(token) = overrides.mayan_api_token {
            self.mayan.api_token = Some(token);
        }
        self
    }
}
