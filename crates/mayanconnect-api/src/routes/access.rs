//! Access rule administration.
//!
//! - `GET /api/access`: list all rules, expired ones included
//! - `POST /api/access`: create a rule
//! - `DELETE /api/access/{id}`: delete a rule
//!
//! Anyone may call these; there is no administrator check.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use chrono::{DateTime, NaiveDateTime, Utc};
use mayanconnect_access::{AccessRule, DocumentId, NewRule, RuleId};
use serde::Deserialize;
use serde_json::Value;

use crate::response::{Success, acknowledged, success};
use crate::{ApiError, AppState};

/// Accepted `datetime-local` layouts, interpreted as UTC.
const LOCAL_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Body of `POST /api/access`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRuleRequest {
    /// User to grant access to. Required.
    #[serde(default)]
    pub username: Option<String>,
    /// Document to grant access to: an integer or a string holding one. Required.
    #[serde(default)]
    pub document_id: Option<Value>,
    /// Optional expiry: RFC 3339, or `YYYY-MM-DDTHH:MM[:SS]` as UTC.
    #[serde(default)]
    pub expires_at: Option<String>,
    /// Optional creator; `"admin"` when absent.
    #[serde(default)]
    pub created_by: Option<String>,
}

impl CreateRuleRequest {
    /// Validate the request and turn it into store input.
    pub fn into_new_rule(self) -> Result<NewRule, ApiError> {
        let username = self.username.filter(|u| !u.is_empty());
        let document_id = self.document_id.filter(|v| !is_blank(v));
        let (Some(username), Some(document_id)) = (username, document_id) else {
            return Err(ApiError::bad_request("username and documentId are required"));
        };

        let document_id = parse_document_id(&document_id)?;
        let expires_at = match self.expires_at.as_deref() {
            Some(raw) => parse_expiry(raw)?,
            None => None,
        };
        let created_by = self.created_by.filter(|c| !c.is_empty());

        Ok(NewRule::new(username, document_id)
            .with_expiry(expires_at)
            .with_creator(created_by))
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Parse a document id given as a JSON integer or a string holding one.
pub fn parse_document_id(value: &Value) -> Result<DocumentId, ApiError> {
    let invalid = || ApiError::bad_request("documentId must be an integer");
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .ok_or_else(invalid),
        Value::String(s) => s.trim().parse::<DocumentId>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

/// Parse an expiry timestamp. Blank input means no expiry.
pub fn parse_expiry(raw: &str) -> Result<Option<DateTime<Utc>>, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(at.with_timezone(&Utc)));
    }
    LOCAL_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| Some(naive.and_utc()))
        .ok_or_else(|| ApiError::bad_request("expiresAt must be an RFC 3339 timestamp"))
}

/// List all access rules in creation order.
pub async fn list_rules(State(state): State<AppState>) -> Json<Success<Vec<AccessRule>>> {
    Json(Success {
        success: true,
        data: state.store.list(),
    })
}

/// Create an access rule.
pub async fn create_rule(
    State(state): State<AppState>,
    body: Result<Json<CreateRuleRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Rejected access rule body");
        ApiError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let input = body.into_new_rule()?;
    let rule = state.store.add(input);
    tracing::info!(
        id = %rule.id,
        username = %rule.username,
        document_id = rule.document_id,
        expires_at = ?rule.expires_at,
        created_by = %rule.created_by,
        "Access rule created"
    );

    Ok(success(StatusCode::CREATED, rule))
}

/// Delete an access rule by id.
pub async fn delete_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = RuleId::from(id);
    if !state.store.delete(&id) {
        return Err(ApiError::NotFound("Rule not found".to_string()));
    }

    tracing::info!(id = %id, "Access rule deleted");
    Ok(acknowledged())
}
