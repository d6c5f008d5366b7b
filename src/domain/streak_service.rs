//! Completion streaks.
//!
//! A completion day is any calendar date with at least one completed task,
//! counted by completion date when recorded and due date otherwise. Today is
//! not treated as a gap until it ends: when nothing is done yet today, the
//! current streak is measured ending at yesterday instead.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;

use crate::domain::models::Todo;

/// Window, in days, scanned when computing the best streak.
const BEST_STREAK_WINDOW_DAYS: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct Streaks {
    /// Consecutive completion days ending at today (or yesterday when today
    /// has no completion yet).
    pub current: u32,
    /// Longest run of consecutive completion days in the trailing 90 days.
    pub best: u32,
}

/// Stateless streak computations.
#[derive(Clone, Default)]
pub struct StreakService;

impl StreakService {
    pub fn new() -> Self {
        Self
    }

    pub fn streaks(&self, todos: &[Todo], today: NaiveDate) -> Streaks {
        let completion_days: HashSet<NaiveDate> = todos
            .iter()
            .filter(|t| t.completed)
            .map(|t| t.completion_date())
            .collect();

        Streaks {
            current: current_streak(&completion_days, today),
            best: best_streak(&completion_days, today),
        }
    }
}

fn current_streak(completion_days: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    // Today counts when present, but an empty today does not break the run;
    // start from yesterday instead.
    let mut day = if completion_days.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };

    let mut streak = 0;
    while completion_days.contains(&day) {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}

fn best_streak(completion_days: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    let window_start = today - Duration::days(BEST_STREAK_WINDOW_DAYS);

    let mut best = 0;
    let mut run = 0;
    let mut day = window_start;
    while day <= today {
        if completion_days.contains(&day) {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
        day += Duration::days(1);
    }
    best
}
