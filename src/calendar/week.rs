//! Week projection

use chrono::{NaiveDate, Weekday};

use crate::task::Task;
use super::{tasks_on, DayBucket};

/// The seven days of the (Monday-start) week that contains `today`, starting with `today`.
///
/// The days before `today` are moved to the end, keeping their order: on a Wednesday this returns
/// Wed, Thu, Fri, Sat, Sun, Mon, Tue.
pub fn week_days(today: NaiveDate) -> Vec<NaiveDate> {
    week_days_of(today, today)
}

/// The seven days of the (Monday-start) week that contains `reference`.
///
/// If `today` belongs to that week, the days are rotated so that `today` comes first.
pub fn week_days_of(reference: NaiveDate, today: NaiveDate) -> Vec<NaiveDate> {
    let monday = reference.week(Weekday::Mon).first_day();
    let mut days: Vec<NaiveDate> = monday.iter_days().take(7).collect();

    if let Some(today_index) = days.iter().position(|day| *day == today) {
        days.rotate_left(today_index);
    }
    days
}

/// One bucket per day of [`week_days`], each sorted by start time.
pub fn week_projection(tasks: &[Task], today: NaiveDate) -> Vec<DayBucket<'_>> {
    project_days(tasks, week_days(today))
}

/// One bucket per given day, each sorted by start time.
///
/// Start times are compared as strings, which is correct because they are fixed-width `HH:MM`. The sort is stable.
pub fn project_days(tasks: &[Task], days: Vec<NaiveDate>) -> Vec<DayBucket<'_>> {
    days.into_iter()
        .map(|date| {
            let mut day_tasks = tasks_on(tasks, date);
            day_tasks.sort_by(|a, b| a.start_time().cmp(b.start_time()));
            DayBucket{ date, tasks: day_tasks }
        })
        .collect()
}
