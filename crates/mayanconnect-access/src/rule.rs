//! Access rule types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a document in the external document API.
pub type DocumentId = i64;

/// Creator recorded when a rule is added without one.
pub const DEFAULT_CREATOR: &str = "admin";

/// Unique identifier of an access rule.
///
/// Minted by the store from a monotonically increasing sequence and
/// rendered as a decimal string (`"1"`, `"2"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    /// Creates a rule ID from a string.
    ///
    /// # Examples
    ///
    /// ```
    /// use mayanconnect_access::RuleId;
    ///
    /// let id = RuleId::new("7");
    /// assert_eq!(id.as_str(), "7");
    /// ```
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub(crate) fn from_sequence(n: u64) -> Self {
        Self(n.to_string())
    }

    /// Returns the rule ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RuleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RuleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for RuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A grant permitting `username` to access `document_id`, optionally until `expires_at`.
///
/// Rules are immutable once created. Expiry is evaluated at query time, so
/// an expired rule stays in the store until it is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRule {
    /// Unique rule identifier.
    pub id: RuleId,
    /// User the grant applies to, compared by exact equality.
    pub username: String,
    /// Document the grant applies to.
    pub document_id: DocumentId,
    /// Instant after which the grant is no longer honored; `None` never expires.
    pub expires_at: Option<DateTime<Utc>>,
    /// When the rule was created.
    pub created_at: DateTime<Utc>,
    /// Who created the rule. Never validated.
    pub created_by: String,
}

impl AccessRule {
    /// Returns `true` if the rule is for this user and document, ignoring expiry.
    pub fn matches(&self, username: &str, document_id: DocumentId) -> bool {
        self.username == username && self.document_id == document_id
    }

    /// Returns `true` if the rule has expired at `at`.
    ///
    /// A rule expiring exactly at `at` counts as expired.
    pub fn is_expired_at(&self, at: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= at)
    }

    /// Returns `true` if the rule grants `username` access to `document_id` at `at`.
    pub fn grants(&self, username: &str, document_id: DocumentId, at: DateTime<Utc>) -> bool {
        self.matches(username, document_id) && !self.is_expired_at(at)
    }
}

/// Input for [`AccessRuleStore::add`](crate::AccessRuleStore::add).
///
/// The store performs no validation; callers reject missing fields first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRule {
    /// User to grant access to.
    pub username: String,
    /// Document to grant access to.
    pub document_id: DocumentId,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
    /// Optional creator; [`DEFAULT_CREATOR`] when absent.
    pub created_by: Option<String>,
}

impl NewRule {
    /// Creates a non-expiring rule input for `username` and `document_id`.
    pub fn new(username: impl Into<String>, document_id: DocumentId) -> Self {
        Self {
            username: username.into(),
            document_id,
            expires_at: None,
            created_by: None,
        }
    }

    /// Sets the expiry.
    pub fn with_expiry(mut self, expires_at: Option<DateTime<Utc>>) -> Self {
        self.expires_at = expires_at;
        self
    }

    /// Sets the creator.
    pub fn with_creator(mut self, created_by: Option<String>) -> Self {
        self.created_by = created_by;
        self
    }
}
