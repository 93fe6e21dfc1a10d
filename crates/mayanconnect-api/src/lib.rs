//! # mayanconnect-api
//!
//! HTTP API server for MayanConnect.
//!
//! This crate provides the HTTP surface over the access rule store:
//! - Access rule listing, creation and deletion
//! - Document listing, detail and download proxied from Mayan, gated by the rule store
//! - Caller resolution from the `x-username` header
//! - Configuration loading and the server entry point

#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use response::ApiError;
pub use server::Server;
pub use state::AppState;
