//! Shared in-memory access rule store.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use crate::rule::{AccessRule, DEFAULT_CREATOR, DocumentId, NewRule, RuleId};

/// Thread-safe registry of access rules.
///
/// Cheap to clone (Arc internals); clones share the same rules. Contents
/// live only in process memory. Lookups are a linear scan: expired rules
/// are skipped, never evicted, and any single live match grants access.
#[derive(Clone, Default)]
pub struct AccessRuleStore {
    inner: Arc<RwLock<Rules>>,
}

#[derive(Default)]
struct Rules {
    rules: Vec<AccessRule>,
    issued: u64,
}

impl AccessRuleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // No operation leaves `Rules` half-updated, so a poisoned lock is safe to reuse.
    fn read(&self) -> RwLockReadGuard<'_, Rules> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Rules> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// All stored rules in creation order, expired ones included.
    pub fn list(&self) -> Vec<AccessRule> {
        self.read().rules.clone()
    }

    /// Create a rule with a fresh id and `created_at` set to now.
    ///
    /// No validation is performed on the input.
    pub fn add(&self, input: NewRule) -> AccessRule {
        let mut guard = self.write();
        guard.issued += 1;

        let rule = AccessRule {
            id: RuleId::from_sequence(guard.issued),
            username: input.username,
            document_id: input.document_id,
            expires_at: input.expires_at,
            created_at: Utc::now(),
            created_by: input
                .created_by
                .unwrap_or_else(|| DEFAULT_CREATOR.to_string()),
        };
        guard.rules.push(rule.clone());

        log::debug!(
            "Access rule {} added: {} -> document {}",
            rule.id,
            rule.username,
            rule.document_id
        );
        rule
    }

    /// Remove the rule with `id`. Returns whether a rule was removed.
    pub fn delete(&self, id: &RuleId) -> bool {
        let mut guard = self.write();
        match guard.rules.iter().position(|r| &r.id == id) {
            Some(index) => {
                guard.rules.remove(index);
                log::debug!("Access rule {id} deleted");
                true
            }
            None => false,
        }
    }

    /// Whether `username` may currently access `document_id`.
    pub fn is_allowed(&self, username: &str, document_id: DocumentId) -> bool {
        self.is_allowed_at(username, document_id, Utc::now())
    }

    /// Whether `username` may access `document_id` at instant `at`.
    ///
    /// True if at least one rule matches exactly and expires strictly after `at`
    /// (or never expires).
    pub fn is_allowed_at(
        &self,
        username: &str,
        document_id: DocumentId,
        at: DateTime<Utc>,
    ) -> bool {
        self.read()
            .rules
            .iter()
            .any(|r| r.grants(username, document_id, at))
    }

    /// Number of stored rules.
    pub fn len(&self) -> usize {
        self.read().rules.len()
    }

    /// Returns `true` if no rules are stored.
    pub fn is_empty(&self) -> bool {
        self.read().rules.is_empty()
    }
}

impl fmt::Debug for AccessRuleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessRuleStore")
            .field("rules", &self.len())
            .finish()
    }
}
