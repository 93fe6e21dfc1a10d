//! API server implementation

use std::sync::Arc;

use axum::Router;
use mayanconnect_access::AccessRuleStore;
use mayanconnect_client::MayanClient;

use crate::{AppState, Config, Result, routes};

/// MayanConnect API server
pub struct Server {
    config: Config,
    state: AppState,
}

impl Server {
    /// Create a server with an empty rule store.
    ///
    /// The document client is only built when the Mayan URL and token are
    /// both configured; otherwise document routes answer as unconfigured.
    pub fn new(config: Config) -> Result<Self> {
        let mut state = AppState::new(AccessRuleStore::new());

        if config.mayan.is_complete() {
            let client = MayanClient::from_config(&config.mayan)?;
            tracing::info!(base_url = client.base_url(), "Mayan document API configured");
            state = state.with_documents(Arc::new(client));
        } else {
            tracing::warn!("Mayan API URL or token missing; document routes will report 500");
        }

        Ok(Self { config, state })
    }

    /// Shared handler state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The application router.
    pub fn router(&self) -> Router {
        routes::router(self.state.clone(), self.config.identity.clone())
    }

    /// Bind the configured address and serve until Ctrl-C.
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(self.config.server.bind).await?;
        tracing::info!(addr = %listener.local_addr()?, "MayanConnect listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!(rules = self.state.store.len(), "MayanConnect stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
