//! Caller identity for MayanConnect.
//!
//! Provides:
//! - [`Caller`]: the username a request acts as
//! - [`IdentityLayer`] / [`IdentityService`]: Tower middleware resolving the caller from a header
//! - [`IdentityConfig`]: header name and anonymous fallback
//!
//! There is no credential check: the caller is whoever the header names,
//! and requests without one act as the anonymous identity.

mod caller;
mod middleware;

use serde::{Deserialize, Serialize};

pub use caller::{Caller, caller_from_parts, username_from_parts};
pub use middleware::{IdentityLayer, IdentityService};

/// Header carrying the caller's username by default.
pub const DEFAULT_USERNAME_HEADER: &str = "x-username";

/// Username used when a request names no caller.
pub const ANONYMOUS: &str = "anonymous";

/// Configuration for caller resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Request header holding the caller's username.
    pub header: String,
    /// Username assumed when the header is missing or empty.
    pub anonymous: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            header: DEFAULT_USERNAME_HEADER.to_string(),
            anonymous: ANONYMOUS.to_string(),
        }
    }
}

impl IdentityConfig {
    /// Resolve the caller named by `headers`.
    ///
    /// A missing, empty, or non-UTF-8 header value yields the anonymous caller.
    pub fn resolve(&self, headers: &http::HeaderMap) -> Caller {
        let username = headers
            .get(self.header.as_str())
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty());

        match username {
            Some(name) => Caller::new(name),
            None => Caller::anonymous(self.anonymous.as_str()),
        }
    }
}
