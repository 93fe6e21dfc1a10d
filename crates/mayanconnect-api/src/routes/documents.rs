//! Document routes proxied from Mayan.
//!
//! Detail and download are gated by the access rule store; the caller is
//! resolved from the identity header.

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use mayanconnect_access::DocumentId;
use mayanconnect_auth::Caller;
use mayanconnect_client::Error as ClientError;

use crate::response::success;
use crate::{ApiError, AppState};

fn parse_id(raw: &str) -> Option<DocumentId> {
    raw.trim().parse().ok()
}

fn ensure_allowed(
    state: &AppState,
    caller: &Caller,
    document_id: DocumentId,
    action: &str,
) -> Result<(), ApiError> {
    let username = caller.username();
    if state.store.is_allowed(username, document_id) {
        return Ok(());
    }
    tracing::info!(username, document_id, action, "Document access denied");
    Err(ApiError::Forbidden(format!(
        "User {username} is not allowed to {action} document {document_id}"
    )))
}

/// `GET /api/documents`: list documents. Not gated.
pub async fn list_documents(State(state): State<AppState>) -> Result<Response, ApiError> {
    let documents = state.documents()?;

    match documents.list_documents().await {
        Ok(data) => Ok(success(StatusCode::OK, data)),
        Err(ClientError::Status { status, body }) => {
            tracing::error!(status, body = %body, "Mayan API error");
            Err(ApiError::upstream_status(
                "Failed to fetch documents from Mayan.",
                status,
            ))
        }
        Err(err) => {
            tracing::error!(error = %err, "Error calling Mayan API");
            Err(ApiError::upstream("Unexpected error calling Mayan API."))
        }
    }
}

/// `GET /api/documents/{id}`: document details for an allowed caller.
pub async fn get_document(
    State(state): State<AppState>,
    caller: Caller,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let documents = state.documents()?;
    let document_id =
        parse_id(&raw_id).ok_or_else(|| ApiError::bad_request("Invalid document id."))?;
    ensure_allowed(&state, &caller, document_id, "view")?;

    match documents.get_document(document_id).await {
        Ok(data) => Ok(success(StatusCode::OK, data)),
        Err(err @ ClientError::Status { .. }) => Err(ApiError::upstream(err.to_string())),
        Err(err) => {
            tracing::error!(document_id, error = %err, "Network error contacting Mayan");
            Err(ApiError::upstream("Network error contacting Mayan."))
        }
    }
}

/// `GET /api/documents/{id}/download`: latest file bytes for an allowed caller.
pub async fn download_document(
    State(state): State<AppState>,
    caller: Caller,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let documents = state.documents()?;
    let document_id = parse_id(&raw_id)
        .ok_or_else(|| ApiError::bad_request(format!("Invalid document id: {raw_id}")))?;
    ensure_allowed(&state, &caller, document_id, "download")?;

    match documents.download_latest(document_id).await {
        Ok(file) => {
            tracing::info!(
                username = caller.username(),
                document_id,
                bytes = file.body.len(),
                "Document downloaded"
            );
            Ok((
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, file.content_type),
                    (header::CONTENT_DISPOSITION, file.content_disposition),
                ],
                file.body,
            )
                .into_response())
        }
        Err(ClientError::MissingDownloadUrl) => Err(ApiError::NotFound(
            ClientError::MissingDownloadUrl.to_string(),
        )),
        Err(ClientError::Status { status, body }) => Err(ApiError::upstream(format!(
            "Mayan error {status} while fetching document details: {body}"
        ))),
        Err(err @ ClientError::DownloadStatus { .. }) => Err(ApiError::upstream(err.to_string())),
        Err(err) => {
            tracing::error!(document_id, error = %err, "Error while downloading from Mayan");
            Err(ApiError::upstream("Network error while downloading from Mayan."))
        }
    }
}
