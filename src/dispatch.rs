//! Operation dispatch shared by both transports.
//!
//! A transport turns its request into an [`Operation`], hands it to the
//! [`Dispatcher`], and maps the resulting [`Outcome`] onto its own wire format.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::store::MemoryStore;

/// Message returned when an operation is given an empty key.
pub const EMPTY_KEY_MESSAGE: &str = "Key cannot be empty";

/// A validated request against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Insert or overwrite a value.
    Store {
        /// Key to write
        key: String,
        /// Value to store
        value: String,
    },
    /// Look up a value.
    Get {
        /// Key to read
        key: String,
    },
    /// List all keys.
    List,
    /// Remove a key.
    Delete {
        /// Key to remove
        key: String,
    },
    /// Remove every key.
    Clear,
}

impl Operation {
    /// Short operation name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Store { .. } => "store",
            Operation::Get { .. } => "get",
            Operation::List => "list",
            Operation::Delete { .. } => "delete",
            Operation::Clear => "clear",
        }
    }
}

/// Classification of an operation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    /// The operation did what was asked.
    Success,
    /// The key does not exist. Not an error.
    NotFound,
    /// The request was rejected before touching the store.
    Invalid,
    /// Something unexpected went wrong.
    Error,
}

/// Result of a dispatched operation: a kind plus the caller-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Result classification
    pub kind: OutcomeKind,
    /// Human-readable message surfaced by both transports
    pub message: String,
}

impl Outcome {
    fn new(kind: OutcomeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Successful outcome.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(OutcomeKind::Success, message)
    }

    /// Key-not-found outcome.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(OutcomeKind::NotFound, message)
    }

    /// Validation failure outcome.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(OutcomeKind::Invalid, message)
    }

    /// Internal failure outcome.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(OutcomeKind::Error, message)
    }

    /// Whether this outcome is a success.
    pub fn is_success(&self) -> bool {
        self.kind == OutcomeKind::Success
    }
}

/// Executes operations against a shared store.
///
/// Cheap to clone; every clone refers to the same [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct Dispatcher {
    store: Arc<MemoryStore>,
}

impl Dispatcher {
    /// Create a dispatcher over the given store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// The store this dispatcher operates on.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Run an operation and render its outcome.
    ///
    /// Never panics: a panic inside the store is caught and reported as an
    /// [`OutcomeKind::Error`] outcome.
    pub fn dispatch(&self, op: Operation) -> Outcome {
        let name = op.name();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.execute(op)))
            .unwrap_or_else(|payload| {
                let reason = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                tracing::error!(operation = name, %reason, "operation panicked");
                Outcome::error(format!("Internal error: {}", reason))
            });

        tracing::debug!(operation = name, kind = ?outcome.kind, "dispatched");
        outcome
    }

    fn execute(&self, op: Operation) -> Outcome {
        match op {
            Operation::Store { key, value } => {
                if self.store.store(&key, &value) {
                    Outcome::success(format!("Stored value '{}' under key '{}'", value, key))
                } else {
                    Outcome::invalid(EMPTY_KEY_MESSAGE)
                }
            }

            Operation::Get { key } => {
                if key.is_empty() {
                    return Outcome::invalid(EMPTY_KEY_MESSAGE);
                }
                match self.store.get(&key) {
                    Some(value) => Outcome::success(format!("Value for key '{}': {}", key, value)),
                    None => Outcome::not_found(format!("No value found for key '{}'", key)),
                }
            }

            Operation::List => {
                let keys = self.store.list_keys();
                if keys.is_empty() {
                    Outcome::success("No keys stored in memory")
                } else {
                    Outcome::success(format!("Keys in memory: {}", keys.join(", ")))
                }
            }

            Operation::Delete { key } => {
                if key.is_empty() {
                    return Outcome::invalid(EMPTY_KEY_MESSAGE);
                }
                if self.store.delete(&key) {
                    Outcome::success(format!("Deleted key '{}' from memory", key))
                } else {
                    Outcome::not_found(format!("Key '{}' not found in memory", key))
                }
            }

            Operation::Clear => {
                let count = self.store.clear();
                Outcome::success(format!("Cleared {} items from memory", count))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(MemoryStore::new()))
    }

    fn store_op(key: &str, value: &str) -> Operation {
        Operation::Store {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_store_message() {
        let d = dispatcher();
        let outcome = d.dispatch(store_op("a", "1"));
        assert_eq!(outcome, Outcome::success("Stored value '1' under key 'a'"));
    }

    #[test]
    fn test_store_empty_key_is_invalid() {
        let d = dispatcher();
        let outcome = d.dispatch(store_op("", "1"));
        assert_eq!(outcome, Outcome::invalid("Key cannot be empty"));
        assert!(d.store().is_empty());
    }

    #[test]
    fn test_get_found_and_missing() {
        let d = dispatcher();
        d.dispatch(store_op("foo", "bar"));

        let found = d.dispatch(Operation::Get { key: "foo".to_string() });
        assert_eq!(found, Outcome::success("Value for key 'foo': bar"));

        let missing = d.dispatch(Operation::Get { key: "nope".to_string() });
        assert_eq!(missing, Outcome::not_found("No value found for key 'nope'"));
    }

    #[test]
    fn test_list_messages() {
        let d = dispatcher();
        assert_eq!(
            d.dispatch(Operation::List),
            Outcome::success("No keys stored in memory")
        );

        d.dispatch(store_op("only", "1"));
        assert_eq!(
            d.dispatch(Operation::List),
            Outcome::success("Keys in memory: only")
        );

        d.dispatch(store_op("other", "2"));
        let outcome = d.dispatch(Operation::List);
        let keys = outcome.message.trim_start_matches("Keys in memory: ");
        let mut keys: Vec<&str> = keys.split(", ").collect();
        keys.sort();
        assert_eq!(keys, vec!["only", "other"]);
    }

    #[test]
    fn test_delete_messages() {
        let d = dispatcher();
        d.dispatch(store_op("k", "v"));

        let deleted = d.dispatch(Operation::Delete { key: "k".to_string() });
        assert_eq!(deleted, Outcome::success("Deleted key 'k' from memory"));

        let again = d.dispatch(Operation::Delete { key: "k".to_string() });
        assert_eq!(again, Outcome::not_found("Key 'k' not found in memory"));

        let empty = d.dispatch(Operation::Delete { key: String::new() });
        assert_eq!(empty.kind, OutcomeKind::Invalid);
    }

    #[test]
    fn test_clear_message() {
        let d = dispatcher();
        d.dispatch(store_op("x", "1"));
        d.dispatch(store_op("y", "2"));
        assert_eq!(
            d.dispatch(Operation::Clear),
            Outcome::success("Cleared 2 items from memory")
        );
        assert_eq!(
            d.dispatch(Operation::Clear),
            Outcome::success("Cleared 0 items from memory")
        );
    }

    #[test]
    fn test_clones_share_store() {
        let a = dispatcher();
        let b = a.clone();
        a.dispatch(store_op("shared", "yes"));
        let outcome = b.dispatch(Operation::Get { key: "shared".to_string() });
        assert!(outcome.is_success());
    }
}
