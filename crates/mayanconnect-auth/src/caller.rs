//! Caller identity and extraction helpers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;

use crate::{ANONYMOUS, IdentityConfig};

/// The identity a request acts as.
///
/// Stored in HTTP request extensions by [`IdentityLayer`](crate::IdentityLayer)
/// and extracted in handlers as an axum extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    username: String,
    anonymous: bool,
}

impl Caller {
    /// Create a caller with the given username.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            anonymous: false,
        }
    }

    /// Create the fallback identity for requests that name no caller.
    pub fn anonymous(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            anonymous: true,
        }
    }

    /// The caller's username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Whether the request named no caller and fell back to the anonymous identity.
    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }
}

/// Extract the [`Caller`] from HTTP request `Parts`, if the layer resolved one.
pub fn caller_from_parts(parts: &http::request::Parts) -> Option<&Caller> {
    parts.extensions.get::<Caller>()
}

/// Extract the caller's username from HTTP request `Parts`.
///
/// Returns `"anonymous"` if no caller was resolved.
pub fn username_from_parts(parts: &http::request::Parts) -> &str {
    parts
        .extensions
        .get::<Caller>()
        .map(|c| c.username.as_str())
        .unwrap_or(ANONYMOUS)
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        // Without the layer, fall back to the default header.
        Ok(match caller_from_parts(parts) {
            Some(caller) => caller.clone(),
            None => IdentityConfig::default().resolve(&parts.headers),
        })
    }
}
