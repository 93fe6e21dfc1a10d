//! Error types for mayanconnect-api

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for mayanconnect-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur configuring or starting the server
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from mayanconnect-client
    #[error("Client error: {0}")]
    Client(#[from] mayanconnect_client::Error),

    /// Config file could not be read
    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigRead {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be parsed
    #[error("Invalid config file {}: {message}", path.display())]
    ConfigParse {
        /// Path that was parsed
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// I/O error (binding the listener, serving)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
