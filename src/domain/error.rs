//! Domain error taxonomy.
//!
//! Everything here is local and recoverable; nothing aborts the process.
//! Repository-level not-found on update/delete is a silent no-op and never
//! surfaces as an error.

use thiserror::Error;

use crate::domain::validation::ValidationError;

#[derive(Debug, Error)]
pub enum DomainError {
    /// A form input failed validation; no mutation was performed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A client with referencing tasks cannot be deleted.
    #[error("Client has {task_count} task(s) and cannot be deleted")]
    ClientHasTasks { task_count: usize },

    /// The referenced task has vanished.
    #[error("Task not found: {id}")]
    TodoNotFound { id: String },

    /// A backup file was rejected before any state was replaced.
    #[error("Invalid backup file: {reason}")]
    InvalidBackup { reason: &'static str },

    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
