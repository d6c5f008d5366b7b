//! In-memory record store.
//!
//! Backs ephemeral sessions and unit tests; nothing survives the process.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Mutex;

use super::traits::RecordStore;

/// A [`RecordStore`] backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let records = self
            .records
            .lock()
            .map_err(|_| anyhow::anyhow!("record store mutex poisoned"))?;
        Ok(records.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| anyhow::anyhow!("record store mutex poisoned"))?;
        records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key_returns_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("rawtask_todos").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let store = MemoryStore::new();
        store.set("rawtask_todos", "[]").unwrap();
        assert_eq!(store.get("rawtask_todos").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let store = MemoryStore::new();
        store.set("k", "old").unwrap();
        store.set("k", "new").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("new"));
    }
}
