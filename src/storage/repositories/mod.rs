//! Entity repositories: CRUD façades over the record store.
//!
//! Each repository exclusively owns one persisted collection, assigns
//! identifiers and creation dates, and writes the whole collection back on
//! every mutation. No input validation happens here; callers validate before
//! invoking (see [`crate::domain::validation`]).

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::storage::traits::RecordStore;

pub mod client_repository;
pub mod money_repository;
pub mod settings_repository;
pub mod todo_repository;

pub use client_repository::ClientRepository;
pub use money_repository::MoneyEntryRepository;
pub use settings_repository::SettingsRepository;
pub use todo_repository::TodoRepository;

/// Storage keys, one namespaced key per collection.
pub const CLIENTS_KEY: &str = "rawtask_clients";
pub const TODOS_KEY: &str = "rawtask_todos";
pub const MONEY_KEY: &str = "rawtask_money";
pub const SETTINGS_KEY: &str = "rawtask_settings";

/// Read a collection from the store; an absent key reads as an empty
/// collection.
fn load_collection<T: DeserializeOwned>(store: &dyn RecordStore, key: &str) -> Result<Vec<T>> {
    match store.get(key)? {
        Some(json) => {
            serde_json::from_str(&json).with_context(|| format!("failed to parse {}", key))
        }
        None => Ok(Vec::new()),
    }
}

/// Write a collection back to the store.
fn save_collection<T: Serialize>(store: &dyn RecordStore, key: &str, items: &[T]) -> Result<()> {
    let json =
        serde_json::to_string(items).with_context(|| format!("failed to serialize {}", key))?;
    store.set(key, &json)
}
