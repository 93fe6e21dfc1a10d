//! The document-source abstraction used by the HTTP layer.

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

/// Content type assumed when the upstream omits one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A downloaded document file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    /// `Content-Type` to serve the file with.
    pub content_type: String,
    /// `Content-Disposition` to serve the file with.
    pub content_disposition: String,
    /// File contents.
    pub body: Vec<u8>,
}

impl DocumentFile {
    /// Default `Content-Disposition` for a document without one.
    pub fn default_disposition(document_id: i64) -> String {
        format!("attachment; filename=\"document-{document_id}\"")
    }
}

/// Read access to documents held by an external document-management system.
#[async_trait]
pub trait DocumentSource: Send + Sync + 'static {
    /// List documents, returning the upstream JSON as-is.
    async fn list_documents(&self) -> Result<Value>;

    /// Fetch one document's details.
    ///
    /// A body that is not JSON is returned as a JSON string.
    async fn get_document(&self, document_id: i64) -> Result<Value>;

    /// Download the latest file of a document.
    async fn download_latest(&self, document_id: i64) -> Result<DocumentFile>;
}
