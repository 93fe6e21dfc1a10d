//! Shared handler state.

use std::sync::Arc;

use mayanconnect_access::AccessRuleStore;
use mayanconnect_client::DocumentSource;

use crate::ApiError;

/// State handed to every request handler.
///
/// Cheap to clone: the store and document source are shared handles.
#[derive(Clone)]
pub struct AppState {
    /// Access rules consulted by document routes.
    pub store: AccessRuleStore,
    documents: Option<Arc<dyn DocumentSource>>,
}

impl AppState {
    /// State with the given store and no document source.
    pub fn new(store: AccessRuleStore) -> Self {
        Self {
            store,
            documents: None,
        }
    }

    /// Attach the document source.
    pub fn with_documents(mut self, documents: Arc<dyn DocumentSource>) -> Self {
        self.documents = Some(documents);
        self
    }

    /// The document source, or [`ApiError::NotConfigured`] if none was attached.
    pub fn documents(&self) -> Result<Arc<dyn DocumentSource>, ApiError> {
        self.documents.clone().ok_or(ApiError::NotConfigured)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .field("documents", &self.documents.is_some())
            .finish()
    }
}
