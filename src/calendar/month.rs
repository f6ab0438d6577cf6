//! Month projection

use chrono::{Local, NaiveDate};

use crate::task::Task;
use super::{days_of_month, first_of_month, shift_months, tasks_on, DayBucket};

/// A navigable month. It remembers a reference date, and projects the tasks of the month this date belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthCursor {
    reference: NaiveDate,
}

impl MonthCursor {
    pub fn new(reference: NaiveDate) -> Self {
        Self { reference }
    }

    /// A cursor on the current month
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn first_day(&self) -> NaiveDate {
        first_of_month(self.reference)
    }

    /// Every day of the month, from the first to the last one
    pub fn days(&self) -> Vec<NaiveDate> {
        days_of_month(self.reference)
    }

    /// One bucket per day of the month.
    ///
    /// Tasks are not sorted: each bucket keeps the order of `tasks`.
    pub fn project<'a>(&self, tasks: &'a [Task]) -> Vec<DayBucket<'a>> {
        self.days()
            .into_iter()
            .map(|date| DayBucket{ date, tasks: tasks_on(tasks, date) })
            .collect()
    }

    /// e.g. `March 2024`
    pub fn title(&self) -> String {
        self.reference.format("%B %Y").to_string()
    }

    /// Move to the next month. The reference day is clamped to the end of the month if needed (Jan 31 becomes Feb 28 or 29)
    pub fn next(&mut self) {
        self.shift(1);
    }

    /// Move to the previous month. The reference day is clamped to the end of the month if needed
    pub fn previous(&mut self) {
        self.shift(-1);
    }

    fn shift(&mut self, months: i32) {
        match shift_months(self.reference, months) {
            Some(date) => self.reference = date,
            None => log::warn!("Cannot move {} by {} months. Staying on {}", self.reference, months, self.title()),
        }
    }
}

impl Default for MonthCursor {
    fn default() -> Self {
        Self::today()
    }
}
