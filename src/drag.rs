//! Drag-and-drop rescheduling
//!
//! Whatever drag-and-drop toolkit a front-end uses, it reports a drop as a [`MoveEvent`]: which task moved, and the indices of the
//! source and destination buckets in the list it rendered. This module turns such an event back into calendar dates.

use chrono::{Datelike, NaiveDate};

use crate::calendar::{clamp_day_in_month, DayBucket, MonthBucket};
use crate::task::{Task, TaskId};

/// A task has been dropped
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveEvent {
    pub task_id: TaskId,
    /// Index of the bucket the task has been dragged from
    pub source: usize,
    /// Index of the bucket the task has been dropped into, or `None` if it was dropped outside of any bucket
    pub destination: Option<usize>,
}

impl MoveEvent {
    pub fn new(task_id: TaskId, source: usize, destination: Option<usize>) -> Self {
        Self { task_id, source, destination }
    }
}

/// The keys of the buckets a view has rendered, in their displayed order
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BucketLayout {
    /// One bucket per day (week and month views)
    Days(Vec<NaiveDate>),
    /// One bucket per month (year view). Each date is the first day of its month
    Months(Vec<NaiveDate>),
}

impl BucketLayout {
    pub fn len(&self) -> usize {
        match self {
            BucketLayout::Days(days) => days.len(),
            BucketLayout::Months(months) => months.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The date a task scheduled on `current` gets when it is dropped into the bucket at `index`.
    ///
    /// In a month layout, the day of month is kept, and clamped to the end of the destination month if needed.
    pub fn date_for(&self, index: usize, current: NaiveDate) -> Option<NaiveDate> {
        match self {
            BucketLayout::Days(days) => days.get(index).copied(),
            BucketLayout::Months(months) => months.get(index)
                .map(|month| clamp_day_in_month(*month, current.day())),
        }
    }
}

impl<'a> From<&[DayBucket<'a>]> for BucketLayout {
    fn from(buckets: &[DayBucket<'a>]) -> Self {
        BucketLayout::Days(buckets.iter().map(|b| b.date).collect())
    }
}

impl<'a> From<&[MonthBucket<'a>]> for BucketLayout {
    fn from(buckets: &[MonthBucket<'a>]) -> Self {
        BucketLayout::Months(buckets.iter().map(|b| b.month).collect())
    }
}

/// Work out how a drop changes the dragged task.
///
/// Returns the task as it should be sent to the store (a copy of the dragged task where only the date differs), or `None` in case there is nothing to update:
/// * the task has been dropped outside of any bucket, or back into its source bucket
/// * a bucket index is out of the layout
/// * the task is unknown (e.g. it has been removed by a resync in the meantime)
/// * the resulting date is the one the task already has
pub fn resolve_move(layout: &BucketLayout, event: &MoveEvent, tasks: &[Task]) -> Option<Task> {
    let destination = match event.destination {
        None => {
            log::debug!("Task {} dropped outside of any bucket", event.task_id);
            return None;
        },
        Some(d) => d,
    };
    if destination == event.source {
        log::trace!("Task {} dropped back into its bucket", event.task_id);
        return None;
    }
    if event.source >= layout.len() || destination >= layout.len() {
        log::warn!("Drop of task {} refers to buckets {} -> {}, but only {} are displayed", event.task_id, event.source, destination, layout.len());
        return None;
    }

    let task = match tasks.iter().find(|t| t.id() == &event.task_id) {
        None => {
            log::debug!("Dropped task {} is unknown. Ignoring the drop", event.task_id);
            return None;
        },
        Some(t) => t,
    };

    let new_date = layout.date_for(destination, task.date())?;
    if new_date == task.date() {
        return None;
    }
    log::debug!("Moving task {} from {} to {}", task.id(), task.date(), new_date);
    Some(task.with_date(new_date))
}
