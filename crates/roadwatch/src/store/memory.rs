//! In-memory key-value persistence.

use std::collections::HashMap;

use super::KeyValueStore;
use crate::error::Result;

/// Key-value storage that lives only as long as the value does.
///
/// Useful for tests and for running without touching the disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValue {
    entries: HashMap<String, String>,
}

impl MemoryKeyValue {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no key is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryKeyValue {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let store = MemoryKeyValue::new();
        assert!(store.is_empty());
        assert_eq!(store.get("obstacles").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let mut store = MemoryKeyValue::new();
        store.set("obstacles", "[]").unwrap();
        store.set("obstacles", "[1]").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("obstacles").unwrap().as_deref(), Some("[1]"));
    }
}
