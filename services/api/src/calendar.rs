//! Working-day arithmetic for the monthly calendar
//!
//! A working day is a weekday (Monday through Friday) of a calendar month.
//! The day-count policy is phrased in terms of the working days a month has
//! and how many of them have already gone by.

use chrono::{Datelike, NaiveDate, Weekday};

/// True for Monday through Friday
pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Number of days in the given month
fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is a valid date");
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("first of month is a valid date");

    next.signed_duration_since(first).num_days() as u32
}

/// Working days in the given month
pub fn working_days_in_month(year: i32, month: u32) -> u32 {
    (1..=days_in_month(year, month))
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .filter(|d| is_working_day(*d))
        .count() as u32
}

/// Working days of `today`'s month that are strictly in the past
pub fn elapsed_working_days(today: NaiveDate) -> u32 {
    (1..today.day())
        .filter_map(|day| NaiveDate::from_ymd_opt(today.year(), today.month(), day))
        .filter(|d| is_working_day(*d))
        .count() as u32
}

/// Working days left in `today`'s month, today included when it is one
pub fn remaining_working_days(today: NaiveDate) -> u32 {
    working_days_in_month(today.year(), today.month()) - elapsed_working_days(today)
}
