//! Calendar projections
//!
//! A projection derives calendar-keyed buckets (one per day, or one per month) from a flat task list and a reference date.
//! Buckets borrow the tasks they contain. They are meant to be recomputed whenever the task list changes, not stored.

pub mod week;
pub mod month;
pub mod year;
pub mod status;

use chrono::{Datelike, Months, NaiveDate};

use crate::task::Task;

/// The tasks that are scheduled on a given day
#[derive(Clone, Debug, PartialEq)]
pub struct DayBucket<'a> {
    pub date: NaiveDate,
    pub tasks: Vec<&'a Task>,
}

/// The tasks that are scheduled in a given month
#[derive(Clone, Debug, PartialEq)]
pub struct MonthBucket<'a> {
    /// The first day of the month
    pub month: NaiveDate,
    pub tasks: Vec<&'a Task>,
}

/// Tasks scheduled on `date`, in the order of `tasks`
pub fn tasks_on(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    tasks.iter()
        .filter(|task| task.date() == date)
        .collect()
}

/// Tasks scheduled in the same month as `month`, in the order of `tasks`
pub fn tasks_in_month(tasks: &[Task], month: NaiveDate) -> Vec<&Task> {
    tasks.iter()
        .filter(|task| same_month(task.date(), month))
        .collect()
}

pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// The first day of the month `date` belongs to
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month
    date.with_day(1).unwrap_or(date)
}

/// Every day of the month `date` belongs to, in order
pub fn days_of_month(date: NaiveDate) -> Vec<NaiveDate> {
    let first = first_of_month(date);
    first.iter_days()
        .take_while(|day| same_month(*day, first))
        .collect()
}

/// Returns the day `day` of the month `month` belongs to.
///
/// Days that do not exist in that month are clamped to its last day (e.g. the 31st of February is the 28th or the 29th)
pub fn clamp_day_in_month(month: NaiveDate, day: u32) -> NaiveDate {
    let first = first_of_month(month);
    let n_days = days_of_month(first).len() as u32;
    let day = day.max(1).min(n_days);
    first.with_day(day).unwrap_or(first)
}

/// Move `date` by `months` months (may be negative), clamping the day to the end of the target month if needed.
/// Returns `None` when the result would not be representable.
pub fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let delta = Months::new(months.unsigned_abs());
    if months >= 0 {
        date.checked_add_months(delta)
    } else {
        date.checked_sub_months(delta)
    }
}

/// A short, human-friendly label for a day: `Today`, `Tomorrow`, or e.g. `Mar 5`
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return String::from("Today");
    }
    if today.succ_opt() == Some(date) {
        return String::from("Tomorrow");
    }
    date.format("%b %-d").to_string()
}
