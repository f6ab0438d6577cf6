//! The state of the calendar views a scheduler can display

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;

use crate::calendar::month::MonthCursor;
use crate::calendar::year::YearCursor;
use crate::calendar::{DayBucket, MonthBucket};
use crate::task::Task;

/// Which calendar is displayed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Week,
    Month,
    Year,
}

impl Default for ViewKind {
    fn default() -> Self {
        ViewKind::Week
    }
}

impl Display for ViewKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewKind::Week => write!(f, "week"),
            ViewKind::Month => write!(f, "month"),
            ViewKind::Year => write!(f, "year"),
        }
    }
}


/// The year view, that can be "drilled down" into one of its months.
///
/// Drilling down is a state of the year view itself: the scheduler still reports [`ViewKind::Year`] while a month is expanded,
/// and this month is independent from the scheduler's own month view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct YearView {
    cursor: YearCursor,
    expanded: Option<MonthCursor>,
}

/// What the year view displays
#[derive(Clone, Debug, PartialEq)]
pub enum YearProjection<'a> {
    /// The twelve months of the year
    Months(Vec<MonthBucket<'a>>),
    /// The days of the month that has been drilled into
    Drilled(Vec<DayBucket<'a>>),
}

impl YearView {
    pub fn new(reference: NaiveDate) -> Self {
        Self {
            cursor: YearCursor::new(reference),
            expanded: None,
        }
    }

    pub fn cursor(&self) -> &YearCursor { &self.cursor }
    pub fn cursor_mut(&mut self) -> &mut YearCursor { &mut self.cursor }

    /// The month that is currently expanded, if any
    pub fn expanded(&self) -> Option<&MonthCursor> { self.expanded.as_ref() }
    pub fn expanded_mut(&mut self) -> Option<&mut MonthCursor> { self.expanded.as_mut() }

    pub fn is_drilled(&self) -> bool {
        self.expanded.is_some()
    }

    /// Expand the month `month` belongs to
    pub fn drill_into(&mut self, month: NaiveDate) {
        log::debug!("Year view: drilling into {}", month.format("%B %Y"));
        self.expanded = Some(MonthCursor::new(month));
    }

    /// Expand the month at `index` (0 for January) of the displayed year
    pub fn drill_into_index(&mut self, index: usize) {
        match self.cursor.months().get(index) {
            Some(month) => self.drill_into(*month),
            None => log::warn!("There is no month #{} in a year", index),
        }
    }

    /// Go back to the twelve-month grid
    pub fn back_to_year(&mut self) {
        self.expanded = None;
    }

    pub fn project<'a>(&self, tasks: &'a [Task]) -> YearProjection<'a> {
        match &self.expanded {
            None => YearProjection::Months(self.cursor.project(tasks)),
            Some(month) => YearProjection::Drilled(month.project(tasks)),
        }
    }
}
