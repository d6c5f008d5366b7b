//! Calendar math shared by the derived-view services.
//!
//! Everything operates on plain calendar dates; there is no timezone handling
//! because record dates are stored and compared as dates only.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Monday..Sunday bounds of the week containing `date` (both inclusive).
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = date.weekday().num_days_from_monday() as i64;
    let start = date - Duration::days(offset);
    (start, start + Duration::days(6))
}

/// Sunday..Saturday bounds of the week containing `date` (both inclusive).
/// The calendar views align weeks this way, matching the month grid.
pub fn sunday_week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = date.weekday().num_days_from_sunday() as i64;
    let start = date - Duration::days(offset);
    (start, start + Duration::days(6))
}

/// Sunday-start bounds of the calendar grid showing `year`/`month`, padded to
/// whole weeks on both sides.
pub fn month_grid_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let month_start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let month_end = last_day_of_month(year, month)?;

    let lead = month_start.weekday().num_days_from_sunday() as i64;
    let grid_start = month_start - Duration::days(lead);

    let trail = 6 - month_end.weekday().num_days_from_sunday() as i64;
    let grid_end = month_end + Duration::days(trail);

    Some((grid_start, grid_end))
}

/// Last calendar day of the given month.
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some(first_of_next - Duration::days(1))
}

/// Every date from `start` to `end`, inclusive.
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut day = start;
    while day <= end {
        days.push(day);
        day += Duration::days(1);
    }
    days
}

/// `YYYY-MM` bucket key for month-based aggregation.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// The `(year, month)` pair `offset` months before the given one.
/// `offset = 0` is the month itself.
pub fn months_back(year: i32, month: u32, offset: u32) -> (i32, u32) {
    let zero_based = year * 12 + (month as i32 - 1) - offset as i32;
    (zero_based.div_euclid(12), (zero_based.rem_euclid(12) + 1) as u32)
}

/// Three-letter weekday label (Mon, Tue, ...).
pub fn weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}
