use std::error::Error;

use async_trait::async_trait;

use crate::task::{NewTask, Task};
use crate::user::{NewUser, User, UserId};

/// A store of tasks, usually the remote server (see [`Client`](crate::client::Client)).
///
/// Every call may fail (e.g. in case of a remote server). Failures are never fatal: callers are expected to log them and keep their previous state.
#[async_trait]
pub trait TaskSource {
    /// Returns every task this source contains
    async fn get_tasks(&self) -> Result<Vec<Task>, Box<dyn Error>>;
    /// Create a task. The source picks its id, and returns the task as it has been stored
    async fn create_task(&mut self, task: NewTask) -> Result<Task, Box<dyn Error>>;
    /// Replace a task (identified by its id) with `task`, and return the task as it has been stored
    async fn update_task(&mut self, task: &Task) -> Result<Task, Box<dyn Error>>;
}

/// A store of users. These share the server of the tasks, but are not used by the scheduler
#[async_trait]
pub trait UserSource {
    async fn get_users(&self) -> Result<Vec<User>, Box<dyn Error>>;
    async fn create_user(&mut self, user: NewUser) -> Result<User, Box<dyn Error>>;
    async fn update_user(&mut self, id: UserId, user: NewUser) -> Result<User, Box<dyn Error>>;
    async fn delete_user(&mut self, id: UserId) -> Result<(), Box<dyn Error>>;
}
