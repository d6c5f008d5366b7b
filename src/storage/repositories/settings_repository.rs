use anyhow::{Context, Result};
use std::sync::Arc;

use crate::domain::models::Settings;
use crate::storage::traits::RecordStore;

use super::SETTINGS_KEY;

/// Persistence for the singleton settings record.
#[derive(Clone)]
pub struct SettingsRepository {
    store: Arc<dyn RecordStore>,
}

impl SettingsRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Load the stored settings, falling back to defaults when nothing has
    /// been saved yet.
    pub fn load(&self) -> Result<Settings> {
        match self.store.get(SETTINGS_KEY)? {
            Some(json) => {
                serde_json::from_str(&json).context("failed to parse stored settings")
            }
            None => Ok(Settings::default()),
        }
    }

    /// Overwrite the stored settings.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let json = serde_json::to_string(settings).context("failed to serialize settings")?;
        self.store.set(SETTINGS_KEY, &json)
    }
}
