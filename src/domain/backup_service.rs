//! Full backup export and import.
//!
//! A backup bundles all four persisted records with a version tag and export
//! timestamp. Import validates the payload before touching storage: a
//! rejected file leaves every collection exactly as it was.

use anyhow::Context;
use chrono::{SecondsFormat, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::domain::error::DomainError;
use crate::domain::models::{Client, MoneyEntry, Settings, Todo};

const BACKUP_VERSION: &str = "1.0";

/// The backup file payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupData {
    pub version: String,
    /// RFC 3339 export timestamp.
    pub exported_at: String,
    pub clients: Vec<Client>,
    pub todos: Vec<Todo>,
    pub money_entries: Vec<MoneyEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
}

/// Shape-check view of an incoming backup: only key presence is validated
/// before the typed parse, so the error can say which key is missing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackupProbe {
    version: Option<serde_json::Value>,
    clients: Option<serde_json::Value>,
    todos: Option<serde_json::Value>,
    money_entries: Option<serde_json::Value>,
}

/// Record counts shown on the backup screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackupStats {
    pub clients: usize,
    pub todos: usize,
    pub money_entries: usize,
}

/// Serializes and restores the whole persisted state.
#[derive(Clone, Default)]
pub struct BackupService;

impl BackupService {
    pub fn new() -> Self {
        Self
    }

    /// Bundle the live collections into a backup payload.
    pub fn export(&self, ctx: &AppContext) -> Result<BackupData, DomainError> {
        Ok(BackupData {
            version: BACKUP_VERSION.to_string(),
            exported_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            clients: ctx.clients.list()?,
            todos: ctx.todos.list()?,
            money_entries: ctx.money.list()?,
            settings: Some(ctx.settings.load()?),
        })
    }

    /// Pretty-printed JSON of the backup payload.
    pub fn export_json(&self, ctx: &AppContext) -> Result<String, DomainError> {
        let backup = self.export(ctx)?;
        let json = serde_json::to_string_pretty(&backup)
            .context("failed to serialize backup")
            .map_err(DomainError::Storage)?;
        info!(
            "Exported backup: {} clients, {} tasks, {} entries",
            backup.clients.len(),
            backup.todos.len(),
            backup.money_entries.len()
        );
        Ok(json)
    }

    /// Replace every collection with the contents of a backup file. The
    /// payload is fully parsed before the first write, so a malformed file
    /// never clobbers existing state.
    pub fn import_json(&self, ctx: &AppContext, json: &str) -> Result<BackupStats, DomainError> {
        let probe: BackupProbe = serde_json::from_str(json).map_err(|_| {
            warn!("Backup import rejected: not a JSON object");
            DomainError::InvalidBackup { reason: "not a JSON object" }
        })?;

        let reason = if probe.version.is_none() {
            Some("missing version")
        } else if probe.clients.is_none() {
            Some("missing clients")
        } else if probe.todos.is_none() {
            Some("missing todos")
        } else if probe.money_entries.is_none() {
            Some("missing moneyEntries")
        } else {
            None
        };
        if let Some(reason) = reason {
            warn!("Backup import rejected: {}", reason);
            return Err(DomainError::InvalidBackup { reason });
        }

        let backup: BackupData = serde_json::from_str(json).map_err(|_| {
            warn!("Backup import rejected: malformed records");
            DomainError::InvalidBackup { reason: "malformed records" }
        })?;

        // Validation passed; now the destructive replacement
        ctx.clients.replace_all(&backup.clients)?;
        ctx.todos.replace_all(&backup.todos)?;
        ctx.money.replace_all(&backup.money_entries)?;
        if let Some(settings) = &backup.settings {
            ctx.settings.save(settings)?;
        }

        let stats = BackupStats {
            clients: backup.clients.len(),
            todos: backup.todos.len(),
            money_entries: backup.money_entries.len(),
        };
        info!(
            "Imported backup: {} clients, {} tasks, {} entries",
            stats.clients, stats.todos, stats.money_entries
        );
        Ok(stats)
    }

    /// Current record counts.
    pub fn stats(&self, ctx: &AppContext) -> Result<BackupStats, DomainError> {
        Ok(BackupStats {
            clients: ctx.clients.list()?.len(),
            todos: ctx.todos.list()?.len(),
            money_entries: ctx.money.list()?.len(),
        })
    }
}
