//! Daily and weekly summaries.
//!
//! Pure projections over the task and money collections: the dashboard tiles
//! for a single day, the Monday-to-Sunday activity breakdown, and monthly
//! goal progress. Recomputation is idempotent and safe on every render.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::dates::{days_in_range, month_key, week_bounds, weekday_label};
use crate::domain::models::{EntryType, MoneyEntry, PaymentStatus, Todo};

/// Dashboard numbers for one calendar day.
///
/// The pending figures intentionally ignore the target date: unpaid work
/// carries over until it is paid, so the backlog is shown whole every day.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct DaySummary {
    pub income: f64,
    pub expense: f64,
    pub pending_unpaid: usize,
    pub pending_amount: f64,
}

/// One day's activity inside the weekly breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayActivity {
    pub date: NaiveDate,
    /// Three-letter weekday label for the chart axis.
    pub label: &'static str,
    pub completed_count: usize,
    pub completed_amount: f64,
    pub income: f64,
    pub expense: f64,
    pub is_today: bool,
    pub is_past: bool,
    pub is_future: bool,
}

/// Progress towards the monthly income goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub monthly_income: f64,
    pub goal: f64,
    /// Percentage of the goal reached, capped at 100.
    pub percent: f64,
    pub goal_met: bool,
}

/// The week view: counts, earnings and a per-day activity strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekSummary {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub completed_count: usize,
    /// Billed amounts of the tasks completed this week.
    pub earned_from_tasks: f64,
    pub weekly_income: f64,
    pub days: Vec<DayActivity>,
    /// Present when a positive monthly goal is configured.
    pub goal_progress: Option<GoalProgress>,
}

/// Stateless summary computations.
#[derive(Clone, Default)]
pub struct SummaryService;

impl SummaryService {
    pub fn new() -> Self {
        Self
    }

    /// Income and expense on `date`, plus the all-time unpaid backlog.
    pub fn day_summary(
        &self,
        todos: &[Todo],
        entries: &[MoneyEntry],
        date: NaiveDate,
    ) -> DaySummary {
        let income = sum_entries(entries, EntryType::Income, |e| e.date == date);
        let expense = sum_entries(entries, EntryType::Expense, |e| e.date == date);

        let pending: Vec<&Todo> = todos
            .iter()
            .filter(|t| t.completed && t.payment_status == PaymentStatus::Unpaid)
            .collect();

        DaySummary {
            income,
            expense,
            pending_unpaid: pending.len(),
            pending_amount: pending.iter().map(|t| t.amount_or_zero()).sum(),
        }
    }

    /// The Monday-start week containing `today`, with per-day activity and,
    /// when `monthly_goal > 0`, goal progress for the current calendar month.
    pub fn week_summary(
        &self,
        todos: &[Todo],
        entries: &[MoneyEntry],
        today: NaiveDate,
        monthly_goal: f64,
    ) -> WeekSummary {
        let (week_start, week_end) = week_bounds(today);

        let completed_this_week: Vec<&Todo> = todos
            .iter()
            .filter(|t| {
                t.completed && {
                    let counted = t.completion_date();
                    counted >= week_start && counted <= week_end
                }
            })
            .collect();

        let weekly_income = sum_entries(entries, EntryType::Income, |e| {
            e.date >= week_start && e.date <= week_end
        });

        let days = days_in_range(week_start, week_end)
            .into_iter()
            .map(|day| {
                let day_completed: Vec<&&Todo> = completed_this_week
                    .iter()
                    .filter(|t| t.completion_date() == day)
                    .collect();
                DayActivity {
                    date: day,
                    label: weekday_label(day),
                    completed_count: day_completed.len(),
                    completed_amount: day_completed.iter().map(|t| t.amount_or_zero()).sum(),
                    income: sum_entries(entries, EntryType::Income, |e| e.date == day),
                    expense: sum_entries(entries, EntryType::Expense, |e| e.date == day),
                    is_today: day == today,
                    is_past: day < today,
                    is_future: day > today,
                }
            })
            .collect();

        let goal_progress = (monthly_goal > 0.0).then(|| {
            let current_month = month_key(today);
            let monthly_income = sum_entries(entries, EntryType::Income, |e| {
                month_key(e.date) == current_month
            });
            GoalProgress {
                monthly_income,
                goal: monthly_goal,
                percent: (monthly_income / monthly_goal * 100.0).min(100.0),
                goal_met: monthly_income >= monthly_goal,
            }
        });

        WeekSummary {
            week_start,
            week_end,
            completed_count: completed_this_week.len(),
            earned_from_tasks: completed_this_week.iter().map(|t| t.amount_or_zero()).sum(),
            weekly_income,
            days,
            goal_progress,
        }
    }

    /// All-time totals for the stats screen.
    pub fn totals(&self, entries: &[MoneyEntry]) -> (f64, f64) {
        let income = sum_entries(entries, EntryType::Income, |_| true);
        let expense = sum_entries(entries, EntryType::Expense, |_| true);
        (income, expense)
    }
}

fn sum_entries<F>(entries: &[MoneyEntry], entry_type: EntryType, predicate: F) -> f64
where
    F: Fn(&MoneyEntry) -> bool,
{
    entries
        .iter()
        .filter(|e| e.entry_type == entry_type && predicate(e))
        .map(|e| e.amount)
        .sum()
}
