//! Calendar views over the task collection.
//!
//! Tasks are grouped by their exact due date. The month view is a grid padded
//! to whole weeks with per-cell counts; the week view is a seven-day strip
//! that previews up to three task titles per day. Rescheduling a task is a
//! plain due-date update with no business-rule validation (past dates are
//! accepted).

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use log::info;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::dates::{days_in_range, month_grid_bounds, sunday_week_bounds};
use crate::domain::models::{Todo, TodoPatch};
use crate::storage::repositories::TodoRepository;

/// Titles shown per day in week mode before collapsing into an overflow count.
const WEEK_VISIBLE_TASKS: usize = 3;

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCell {
    pub date: NaiveDate,
    /// False for the padding days belonging to adjacent months.
    pub in_month: bool,
    pub is_today: bool,
    pub completed_count: usize,
    pub pending_count: usize,
    /// Relative busyness of the day within the visible range.
    pub density: Density,
}

/// Task density relative to the busiest visible day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    None,
    Low,
    Medium,
    High,
}

/// One day of the week strip, with a short task preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekCell {
    pub date: NaiveDate,
    pub is_today: bool,
    pub completed_count: usize,
    pub pending_count: usize,
    /// Up to three task titles for inline display.
    pub visible_titles: Vec<String>,
    /// How many further tasks are hidden behind the preview.
    pub overflow_count: usize,
}

/// Stateless calendar projections plus the reschedule mutation.
#[derive(Clone, Default)]
pub struct CalendarService;

impl CalendarService {
    pub fn new() -> Self {
        Self
    }

    /// Group tasks by due date. Exact string-level date match; no timezone
    /// conversion is applied anywhere.
    pub fn tasks_by_date<'a>(&self, todos: &'a [Todo]) -> BTreeMap<NaiveDate, Vec<&'a Todo>> {
        let mut grouped: BTreeMap<NaiveDate, Vec<&Todo>> = BTreeMap::new();
        for todo in todos {
            grouped.entry(todo.due_date).or_default().push(todo);
        }
        grouped
    }

    /// The month grid for `year`/`month`, padded to whole Sunday-start weeks.
    /// Returns an empty grid for an invalid month.
    pub fn month_grid(
        &self,
        todos: &[Todo],
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> Vec<MonthCell> {
        let Some((grid_start, grid_end)) = month_grid_bounds(year, month) else {
            return Vec::new();
        };
        let grouped = self.tasks_by_date(todos);

        let busiest = days_in_range(grid_start, grid_end)
            .iter()
            .map(|day| grouped.get(day).map_or(0, |tasks| tasks.len()))
            .max()
            .unwrap_or(0);

        days_in_range(grid_start, grid_end)
            .into_iter()
            .map(|date| {
                let tasks = grouped.get(&date).map(Vec::as_slice).unwrap_or(&[]);
                let completed_count = tasks.iter().filter(|t| t.completed).count();
                MonthCell {
                    date,
                    in_month: date.month() == month && date.year() == year,
                    is_today: date == today,
                    completed_count,
                    pending_count: tasks.len() - completed_count,
                    density: density_level(tasks.len(), busiest),
                }
            })
            .collect()
    }

    /// The seven-day strip for the week containing `anchor`, aligned
    /// Sunday-first like the month grid.
    pub fn week_strip(&self, todos: &[Todo], anchor: NaiveDate, today: NaiveDate) -> Vec<WeekCell> {
        let (week_start, week_end) = sunday_week_bounds(anchor);
        let grouped = self.tasks_by_date(todos);

        days_in_range(week_start, week_end)
            .into_iter()
            .map(|date| {
                let tasks = grouped.get(&date).map(Vec::as_slice).unwrap_or(&[]);
                let completed_count = tasks.iter().filter(|t| t.completed).count();
                let visible_titles: Vec<String> = tasks
                    .iter()
                    .take(WEEK_VISIBLE_TASKS)
                    .map(|t| t.title.clone())
                    .collect();
                WeekCell {
                    date,
                    is_today: date == today,
                    completed_count,
                    pending_count: tasks.len() - completed_count,
                    overflow_count: tasks.len().saturating_sub(WEEK_VISIBLE_TASKS),
                    visible_titles,
                }
            })
            .collect()
    }

    /// Move a task to a new due date (drag-initiated reschedule). Unknown ids
    /// are silent no-ops, matching the repository contract.
    pub fn reschedule(
        &self,
        todos: &TodoRepository,
        id: &str,
        new_date: NaiveDate,
    ) -> Result<()> {
        info!("Rescheduling task {} to {}", id, new_date);
        todos.update(
            id,
            TodoPatch {
                due_date: Some(new_date),
                ..Default::default()
            },
        )
    }
}

fn density_level(count: usize, busiest: usize) -> Density {
    if count == 0 || busiest == 0 {
        return Density::None;
    }
    let ratio = count as f64 / busiest as f64;
    if ratio <= 0.33 {
        Density::Low
    } else if ratio <= 0.66 {
        Density::Medium
    } else {
        Density::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{NewTodo, PaymentStatus};
    use crate::storage::memory::MemoryStore;
    use std::sync::Arc;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn todo(id: &str, due: &str, completed: bool) -> Todo {
        Todo {
            id: id.to_string(),
            title: format!("task {}", id),
            client_id: "c1".to_string(),
            completed,
            due_date: date(due),
            payment_status: PaymentStatus::NoPayment,
            amount: None,
            linked_money_id: None,
            created_at: date(due),
            completed_at: None,
        }
    }

    #[test]
    fn test_grouping_is_exact_date_match() {
        let service = CalendarService::new();
        let todos = vec![
            todo("a", "2024-03-10", false),
            todo("b", "2024-03-10", true),
            todo("c", "2024-03-11", false),
        ];

        let grouped = service.tasks_by_date(&todos);
        assert_eq!(grouped[&date("2024-03-10")].len(), 2);
        assert_eq!(grouped[&date("2024-03-11")].len(), 1);
    }

    #[test]
    fn test_month_grid_is_whole_weeks_with_counts() {
        let service = CalendarService::new();
        let todos = vec![
            todo("a", "2024-03-10", true),
            todo("b", "2024-03-10", false),
        ];

        let grid = service.month_grid(&todos, 2024, 3, date("2024-03-10"));
        // March 2024 grid runs Feb 25 .. Apr 6: six full weeks
        assert_eq!(grid.len(), 42);
        assert!(grid.len() % 7 == 0);

        let first = &grid[0];
        assert_eq!(first.date, date("2024-02-25"));
        assert!(!first.in_month);

        let day = grid.iter().find(|c| c.date == date("2024-03-10")).unwrap();
        assert!(day.in_month);
        assert!(day.is_today);
        assert_eq!(day.completed_count, 1);
        assert_eq!(day.pending_count, 1);
        assert_eq!(day.density, Density::High);
    }

    #[test]
    fn test_invalid_month_yields_empty_grid() {
        let service = CalendarService::new();
        assert!(service.month_grid(&[], 2024, 13, date("2024-03-10")).is_empty());
    }

    #[test]
    fn test_density_relative_to_busiest_day() {
        let service = CalendarService::new();
        let todos = vec![
            todo("a1", "2024-03-05", false),
            todo("a2", "2024-03-05", false),
            todo("a3", "2024-03-05", false),
            todo("a4", "2024-03-05", false),
            todo("b1", "2024-03-06", false),
            todo("c1", "2024-03-07", false),
            todo("c2", "2024-03-07", false),
        ];

        let grid = service.month_grid(&todos, 2024, 3, date("2024-03-10"));
        let level = |d: &str| grid.iter().find(|c| c.date == date(d)).unwrap().density;
        assert_eq!(level("2024-03-05"), Density::High);
        assert_eq!(level("2024-03-06"), Density::Low);
        assert_eq!(level("2024-03-07"), Density::Medium);
        assert_eq!(level("2024-03-08"), Density::None);
    }

    #[test]
    fn test_week_strip_previews_three_titles() {
        let service = CalendarService::new();
        let todos = vec![
            todo("a", "2024-03-13", false),
            todo("b", "2024-03-13", false),
            todo("c", "2024-03-13", true),
            todo("d", "2024-03-13", false),
            todo("e", "2024-03-13", false),
        ];

        let strip = service.week_strip(&todos, date("2024-03-13"), date("2024-03-13"));
        assert_eq!(strip.len(), 7);
        // Sunday-first, matching the month grid alignment
        assert_eq!(strip[0].date, date("2024-03-10"));
        assert_eq!(strip[6].date, date("2024-03-16"));

        let wednesday = strip.iter().find(|c| c.is_today).unwrap();
        assert_eq!(wednesday.visible_titles.len(), 3);
        assert_eq!(wednesday.overflow_count, 2);
        assert_eq!(wednesday.completed_count, 1);
        assert_eq!(wednesday.pending_count, 4);

        let empty = &strip[0];
        assert!(empty.visible_titles.is_empty());
        assert_eq!(empty.overflow_count, 0);
    }

    #[test]
    fn test_reschedule_updates_due_date_even_into_the_past() {
        let service = CalendarService::new();
        let repo = TodoRepository::new(Arc::new(MemoryStore::new()));
        let created = repo
            .add_on(
                NewTodo {
                    title: "Logo".to_string(),
                    client_id: "c1".to_string(),
                    completed: false,
                    due_date: date("2024-03-20"),
                    payment_status: PaymentStatus::NoPayment,
                    amount: None,
                },
                date("2024-03-01"),
            )
            .unwrap();

        service.reschedule(&repo, &created.id, date("2023-01-01")).unwrap();
        assert_eq!(repo.get(&created.id).unwrap().unwrap().due_date, date("2023-01-01"));

        // Unknown id stays a silent no-op
        service.reschedule(&repo, "missing", date("2024-04-01")).unwrap();
    }
}
