//! # mayanconnect-client
//!
//! Client for the Mayan EDMS document API.
//!
//! - [`MayanClient`]: token-authenticated HTTP client (list, detail, download)
//! - [`DocumentSource`]: trait the HTTP layer depends on, so it can run against a fake
//! - [`MayanConfig`]: base URL, API token and request timeout

#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod error;
pub mod source;

pub use client::MayanClient;
pub use config::MayanConfig;
pub use error::{Error, Result};
pub use source::{DocumentFile, DocumentSource};
