//! Domain layer: records, validation, and the derived-view services that turn
//! raw task/client/money collections into the projections the UI renders.

pub mod backup_service;
pub mod calendar_service;
pub mod client_service;
pub mod dates;
pub mod error;
pub mod export_service;
pub mod models;
pub mod overdue_service;
pub mod payment_service;
pub mod settings_service;
pub mod streak_service;
pub mod summary_service;
pub mod validation;

pub use backup_service::{BackupData, BackupService, BackupStats};
pub use calendar_service::{CalendarService, Density, MonthCell, WeekCell};
pub use client_service::{ClientService, ClientStats, MonthIncome, TaskFilter, TaskSort};
pub use error::DomainError;
pub use export_service::{ExportService, ReportData, TaskStats};
pub use overdue_service::{OverdueReport, OverdueService, OverdueSeverity, OverdueTask};
pub use payment_service::{PaymentOutcome, PaymentService};
pub use settings_service::{format_amount, SettingsService};
pub use streak_service::{StreakService, Streaks};
pub use summary_service::{
    DayActivity, DaySummary, GoalProgress, SummaryService, WeekSummary,
};
pub use validation::{validate_new_entry, validate_new_todo, ValidationError};
