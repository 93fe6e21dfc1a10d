//! Property-based tests for the access rule store.
