//! MayanConnect Access - temporary per-user, per-document access grants.
//!
//! Provides:
//! - [`AccessRule`]: a grant letting one user read one document, optionally until a deadline
//! - [`NewRule`]: input for creating a rule
//! - [`AccessRuleStore`]: shared in-memory registry with the
//!   [`is_allowed`](AccessRuleStore::is_allowed) check
//!
//! # Usage
//!
//! ```rust
//! use mayanconnect_access::{AccessRuleStore, NewRule};
//!
//! let store = AccessRuleStore::new();
//! let rule = store.add(NewRule::new("alice", 1));
//!
//! assert!(store.is_allowed("alice", 1));
//! assert!(!store.is_allowed("bob", 1));
//!
//! assert!(store.delete(&rule.id));
//! assert!(!store.is_allowed("alice", 1));
//! ```

mod proptests;
mod rule;
mod store;

pub use rule::{AccessRule, DEFAULT_CREATOR, DocumentId, NewRule, RuleId};
pub use store::AccessRuleStore;
