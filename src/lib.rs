//! # rawtask
//!
//! Core of a personal freelancer productivity app: task tracking, client
//! management, and income/expense logging persisted through a small key-value
//! record store, plus the pure derived-view computations behind the UI —
//! daily and weekly summaries, overdue detection, streaks, calendar
//! groupings, client statistics, and report generation.
//!
//! Everything is synchronous and single-user: repository mutations write
//! through to the store immediately, and every view is recomputed from the
//! collections on demand.

pub mod context;
pub mod domain;
pub mod storage;

pub use context::AppContext;
pub use domain::models::{
    Client, ClientColor, Currency, EntryType, MoneyEntry, PaymentStatus, Settings, Todo,
};
pub use domain::DomainError;
pub use storage::{JsonConnection, MemoryStore, RecordStore};
