//! HTTP routes.
//!
//! | Method | Path                            | Handler                          |
//! |--------|---------------------------------|----------------------------------|
//! | GET    | `/api/health`                   | [`health::health`]               |
//! | GET    | `/api/access`                   | [`access::list_rules`]           |
//! | POST   | `/api/access`                   | [`access::create_rule`]          |
//! | DELETE | `/api/access/{id}`              | [`access::delete_rule`]          |
//! | GET    | `/api/documents`                | [`documents::list_documents`]    |
//! | GET    | `/api/documents/{id}`           | [`documents::get_document`]      |
//! | GET    | `/api/documents/{id}/download`  | [`documents::download_document`] |

pub mod access;
pub mod documents;
pub mod health;

use axum::Router;
use axum::routing::{delete, get};
use mayanconnect_auth::{IdentityConfig, IdentityLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the application router.
pub fn router(state: AppState, identity: IdentityConfig) -> Router {
    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/access", get(access::list_rules).post(access::create_rule))
        .route("/api/access/{id}", delete(access::delete_rule))
        .route("/api/documents", get(documents::list_documents))
        .route("/api/documents/{id}", get(documents::get_document))
        .route(
            "/api/documents/{id}/download",
            get(documents::download_document),
        )
        .layer(IdentityLayer::new(identity))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
