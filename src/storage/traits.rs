//! # Storage Traits
//!
//! Defines the key-value storage abstraction the repositories persist through,
//! so the backend (JSON files, in-memory map, browser storage behind a shim)
//! is swappable without touching the domain layer.

use anyhow::Result;

/// A namespaced key-value store holding one JSON document per key.
///
/// Writes are synchronous and last-write-wins; a read issued after a write in
/// the same process must observe that write.
pub trait RecordStore: Send + Sync {
    /// Retrieve the document stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous document.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
