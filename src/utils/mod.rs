//! Some utility functions

use std::io::{stdin, stdout, Read, Write};

use chrono::NaiveDate;

use crate::calendar::{day_label, DayBucket, MonthBucket};
use crate::scheduler::view::YearProjection;
use crate::task::{Priority, Task, TaskStatus};

/// A debug utility that pretty-prints day buckets (e.g. a week)
pub fn print_day_buckets(buckets: &[DayBucket<'_>], today: NaiveDate) {
    for bucket in buckets {
        println!("{} {}", bucket.date.format("%A"), day_label(bucket.date, today));
        for task in &bucket.tasks {
            print_task(task);
        }
    }
}

/// A debug utility that pretty-prints month buckets (i.e. a year)
pub fn print_month_buckets(buckets: &[MonthBucket<'_>]) {
    for bucket in buckets {
        println!("{} ({} tasks)", bucket.month.format("%B"), bucket.tasks.len());
        for task in &bucket.tasks {
            print_task(task);
        }
    }
}

pub fn print_year(projection: &YearProjection<'_>, today: NaiveDate) {
    match projection {
        YearProjection::Months(months) => print_month_buckets(months),
        YearProjection::Drilled(days) => {
            let non_empty: Vec<DayBucket<'_>> = days.iter()
                .filter(|day| day.tasks.is_empty() == false)
                .cloned()
                .collect();
            print_day_buckets(&non_empty, today);
        },
    }
}

pub fn print_task(task: &Task) {
    let status = match task.status() {
        TaskStatus::Pending => " ",
        TaskStatus::InProgress => "~",
        TaskStatus::Completed => "✓",
    };
    let priority = match task.priority() {
        Priority::Low => ".",
        Priority::Medium => "!",
        Priority::High => "‼",
    };
    println!("    {}{} {}-{} {}\t{}", status, priority, task.start_time(), task.end_time(), task.title(), task.id());
}


/// Wait for the user to press enter
pub fn pause() {
    let mut stdout = stdout();
    let _ = stdout.write_all(b"Press Enter to continue...");
    let _ = stdout.flush();
    let _ = stdin().read_exact(&mut [0]);
}
