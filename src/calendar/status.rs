//! Status board: tasks grouped by their status rather than by date

use crate::task::{Task, TaskStatus};

/// Tasks that have the given status, sorted by date (stable, so same-day tasks keep the order of `tasks`)
pub fn tasks_with_status(tasks: &[Task], status: TaskStatus) -> Vec<&Task> {
    let mut matching: Vec<&Task> = tasks.iter()
        .filter(|task| task.status() == status)
        .collect();
    matching.sort_by_key(|task| task.date());
    matching
}

/// How many tasks there are in each status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl StatusCounts {
    pub fn of(tasks: &[Task]) -> Self {
        let mut counts = Self::default();
        for task in tasks {
            match task.status() {
                TaskStatus::Pending => counts.pending += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Completed => counts.completed += 1,
            }
        }
        counts
    }

    pub fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
        }
    }
}
