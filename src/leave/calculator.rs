use chrono::{Datelike, NaiveDate, Weekday};

/// Day of the week never charged against a balance.
pub const EXCLUDED_WEEKDAY: Weekday = Weekday::Sun;

/// Chargeable days in the inclusive range `[start, end]`.
///
/// Ordering is the caller's job; a reversed range yields 0.
pub fn count_leave_days(start: NaiveDate, end: NaiveDate) -> i64 {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| day.weekday() != EXCLUDED_WEEKDAY)
        .count() as i64
}
