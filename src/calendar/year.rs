//! Year projection

use chrono::{Datelike, Local, NaiveDate};

use crate::task::Task;
use super::{shift_months, tasks_in_month, MonthBucket};

/// A navigable year. It remembers a reference date, and projects the tasks of the year this date belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct YearCursor {
    reference: NaiveDate,
}

impl YearCursor {
    pub fn new(reference: NaiveDate) -> Self {
        Self { reference }
    }

    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn year(&self) -> i32 {
        self.reference.year()
    }

    /// The first day of each of the twelve months of the year
    pub fn months(&self) -> Vec<NaiveDate> {
        (1..=12)
            .filter_map(|month| NaiveDate::from_ymd_opt(self.year(), month, 1))
            .collect()
    }

    /// One bucket per month. Each bucket keeps the order of `tasks`.
    pub fn project<'a>(&self, tasks: &'a [Task]) -> Vec<MonthBucket<'a>> {
        self.months()
            .into_iter()
            .map(|month| MonthBucket{ month, tasks: tasks_in_month(tasks, month) })
            .collect()
    }

    /// e.g. `2024`
    pub fn title(&self) -> String {
        self.reference.format("%Y").to_string()
    }

    pub fn next(&mut self) {
        self.shift(12);
    }

    pub fn previous(&mut self) {
        self.shift(-12);
    }

    fn shift(&mut self, months: i32) {
        match shift_months(self.reference, months) {
            Some(date) => self.reference = date,
            None => log::warn!("Cannot move {} by {} months. Staying in {}", self.reference, months, self.title()),
        }
    }
}

impl Default for YearCursor {
    fn default() -> Self {
        Self::today()
    }
}
