//! JSON file storage backend.
//!
//! Each record-store key maps to one `<key>.json` file inside a base
//! directory. Writes go through a temp file followed by an atomic rename so a
//! crash mid-write never leaves a torn document behind.

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::traits::RecordStore;

/// A [`RecordStore`] persisting each key as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a connection rooted at `base_directory`, creating the directory
    /// if it does not exist yet.
    pub fn new(base_directory: impl Into<PathBuf>) -> Result<Self> {
        let base_directory = base_directory.into();
        fs::create_dir_all(&base_directory).with_context(|| {
            format!("failed to create data directory {}", base_directory.display())
        })?;
        info!("Opened JSON store at {}", base_directory.display());
        Ok(Self { base_directory })
    }

    /// Directory this connection reads and writes under.
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    fn file_path(&self, key: &str) -> PathBuf {
        // Keys are namespaced identifiers; keep only filename-safe characters.
        let safe: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.base_directory.join(format!("{}.json", safe))
    }
}

impl RecordStore for JsonConnection {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.file_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.file_path(key);
        let temp_path = path.with_extension("tmp");

        fs::write(&temp_path, value)
            .with_context(|| format!("failed to write {}", temp_path.display()))?;

        // Atomic move from temp to final file
        fs::rename(&temp_path, &path)
            .with_context(|| format!("failed to replace {}", path.display()))?;

        debug!("Persisted {} ({} bytes)", key, value.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::traits::RecordStore;
    use tempfile::TempDir;

    fn setup() -> (JsonConnection, TempDir) {
        let dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(dir.path()).unwrap();
        (connection, dir)
    }

    #[test]
    fn test_missing_key_reads_as_none() {
        let (connection, _dir) = setup();
        assert_eq!(connection.get("rawtask_clients").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let (connection, _dir) = setup();
        connection.set("rawtask_clients", r#"[{"id":"c1"}]"#).unwrap();
        assert_eq!(
            connection.get("rawtask_clients").unwrap().as_deref(),
            Some(r#"[{"id":"c1"}]"#)
        );
    }

    #[test]
    fn test_set_replaces_existing_document() {
        let (connection, _dir) = setup();
        connection.set("rawtask_todos", "[]").unwrap();
        connection.set("rawtask_todos", r#"[{"id":"t1"}]"#).unwrap();
        assert_eq!(
            connection.get("rawtask_todos").unwrap().as_deref(),
            Some(r#"[{"id":"t1"}]"#)
        );
    }

    #[test]
    fn test_keys_map_to_distinct_files() {
        let (connection, dir) = setup();
        connection.set("rawtask_todos", "[]").unwrap();
        connection.set("rawtask_money", "[]").unwrap();
        assert!(dir.path().join("rawtask_todos.json").exists());
        assert!(dir.path().join("rawtask_money.json").exists());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let (connection, dir) = setup();
        connection.set("rawtask_settings", "{}").unwrap();
        assert!(!dir.path().join("rawtask_settings.tmp").exists());
    }
}
