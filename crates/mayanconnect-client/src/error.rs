//! Error types for mayanconnect-client

use thiserror::Error;

/// Result type alias for mayanconnect-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to the document API
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Transport failure (connection refused, timeout, TLS, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The document API answered with a non-success status
    #[error("Mayan error {status}: {body}")]
    Status {
        /// HTTP status code returned upstream
        status: u16,
        /// Response body text
        body: String,
    },

    /// The file download itself answered with a non-success status
    #[error("Mayan error {status} while downloading file: {body}")]
    DownloadStatus {
        /// HTTP status code returned upstream
        status: u16,
        /// Response body text
        body: String,
    },

    /// A response could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Document detail carries no `latest_file.download_url`
    #[error("Could not find latest file download URL in Mayan response.")]
    MissingDownloadUrl,

    /// Client configuration is incomplete or invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// The upstream status code, if the document API answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } | Error::DownloadStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
