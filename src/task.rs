//! Scheduled tasks, as stored by the remote `/tasks` collection

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use chrono::NaiveDate;

/// The lifecycle state of a task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Every status, in the order a status board displays them
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Completed];

    /// The wire name of this status (e.g. `in-progress`)
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in-progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(format!("Unknown task status {:?}", other)),
        }
    }
}


/// How urgent a task is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("Unknown priority {:?}", other)),
        }
    }
}



/// The server-assigned identifier of a task.
///
/// This is opaque to this crate. Some servers hand out numeric ids, they are accepted and kept in their textual form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId {
    content: String,
}

impl TaskId {
    /// Generate a random TaskId, the way a store does when it creates a task
    pub fn random() -> Self {
        let random = uuid::Uuid::new_v4().to_hyphenated().to_string();
        Self { content: random }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl From<String> for TaskId {
    fn from(content: String) -> Self {
        Self { content }
    }
}
impl From<&str> for TaskId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}

/// Used to support serde
impl Serialize for TaskId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.content)
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<TaskId, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        let content = match RawId::deserialize(deserializer)? {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        };
        Ok(TaskId{ content })
    }
}



/// The fields of a task that does not exist on the server yet (i.e. the body of a creation request)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    /// `HH:MM`, 24-hour clock
    pub start_time: String,
    /// `HH:MM`, 24-hour clock
    pub end_time: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
}

/// A scheduled task
///
/// Nothing checks that `start_time` precedes `end_time`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    #[serde(default)]
    description: String,
    date: NaiveDate,
    start_time: String,
    end_time: String,
    status: TaskStatus,
    priority: Priority,
}

impl Task {
    /// Build a task from the fields it was created with, and the id a store assigned to it
    pub fn new(id: TaskId, fields: NewTask) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            date: fields.date,
            start_time: fields.start_time,
            end_time: fields.end_time,
            status: fields.status,
            priority: fields.priority,
        }
    }

    pub fn id(&self) -> &TaskId           { &self.id          }
    pub fn title(&self) -> &str           { &self.title       }
    pub fn description(&self) -> &str     { &self.description }
    pub fn date(&self) -> NaiveDate       { self.date         }
    pub fn start_time(&self) -> &str      { &self.start_time  }
    pub fn end_time(&self) -> &str        { &self.end_time    }
    pub fn status(&self) -> TaskStatus    { self.status       }
    pub fn priority(&self) -> Priority    { self.priority     }

    /// Returns every field but the id
    pub fn fields(&self) -> NewTask {
        NewTask {
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            status: self.status,
            priority: self.priority,
        }
    }

    /// Returns a copy of this task that is scheduled on another date. Every other field is kept as is.
    pub fn with_date(&self, date: NaiveDate) -> Self {
        Self {
            date,
            ..self.clone()
        }
    }

    pub fn set_status(&mut self, new_status: TaskStatus) {
        self.status = new_status;
    }
}
