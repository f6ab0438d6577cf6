//! Creation and edition forms
//!
//! A [`TaskForm`] holds the raw values a user typed. Validation only checks what form controls would check on their own
//! (required fields, well-formed date and times). There is no cross-field validation: an end time before the start time is accepted.

use std::error::Error;
use std::fmt::{Display, Formatter};

use chrono::{NaiveDate, NaiveTime};

use crate::config::{DEFAULT_END_TIME, DEFAULT_START_TIME};
use crate::task::{NewTask, Priority, Task, TaskStatus};

/// Why a form cannot be submitted
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormError {
    EmptyTitle,
    EmptyDescription,
    InvalidDate(String),
    InvalidTime{ field: &'static str, value: String },
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::EmptyTitle => write!(f, "A title is required"),
            FormError::EmptyDescription => write!(f, "A description is required"),
            FormError::InvalidDate(value) => write!(f, "{:?} is not a valid date (expected YYYY-MM-DD)", value),
            FormError::InvalidTime{ field, value } => write!(f, "{:?} is not a valid {} (expected HH:MM)", value, field),
        }
    }
}

impl Error for FormError {}


/// The editable fields of a task
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    pub status: TaskStatus,
    pub priority: Priority,
}

impl TaskForm {
    /// A blank creation form, scheduled on `today` from 09:00 to 10:00
    pub fn new(today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            date: today.format("%Y-%m-%d").to_string(),
            start_time: DEFAULT_START_TIME.to_string(),
            end_time: DEFAULT_END_TIME.to_string(),
            status: TaskStatus::default(),
            priority: Priority::default(),
        }
    }

    /// An edition form, pre-filled with the current values of `task`
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title().to_string(),
            description: task.description().to_string(),
            date: task.date().format("%Y-%m-%d").to_string(),
            start_time: task.start_time().to_string(),
            end_time: task.end_time().to_string(),
            status: task.status(),
            priority: task.priority(),
        }
    }

    /// Check the form, and return the fields of the task it describes
    pub fn validate(&self) -> Result<NewTask, FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            return Err(FormError::EmptyDescription);
        }
        let date = parse_date(&self.date)?;
        check_time("start time", &self.start_time)?;
        check_time("end time", &self.end_time)?;

        Ok(NewTask {
            title: self.title.clone(),
            description: self.description.clone(),
            date,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            status: self.status,
            priority: self.priority,
        })
    }

    /// Check the form, and return the full replacement of `task` it describes.
    pub fn into_update(&self, task: &Task) -> Result<Task, FormError> {
        let fields = self.validate()?;
        Ok(Task::new(task.id().clone(), fields))
    }
}

/// Dates are fixed-width `YYYY-MM-DD`
fn parse_date(value: &str) -> Result<NaiveDate, FormError> {
    if value.len() != 10 {
        return Err(FormError::InvalidDate(value.to_string()));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| FormError::InvalidDate(value.to_string()))
}

/// Times are fixed-width, 24-hour `HH:MM`, so that they sort correctly as strings
fn check_time(field: &'static str, value: &str) -> Result<(), FormError> {
    let well_formed = value.len() == 5
        && NaiveTime::parse_from_str(value, "%H:%M").is_ok();
    if well_formed == false {
        return Err(FormError::InvalidTime{ field, value: value.to_string() });
    }
    Ok(())
}
