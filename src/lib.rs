//! This crate provides a headless task scheduler.
//!
//! Tasks have a date, a time range, a status and a priority. They are stored on a REST server, that is accessed through the [`client`] module.
//! A local store is provided in the [`cache`] module, which can stand in for the server (offline use, tests).
//!
//! A [`Scheduler`](scheduler::Scheduler) owns the task list, and mirrors it from one of these sources: after every change it sends, it fetches the whole list again.
//! It projects the list into week, month and year calendars (see the [`calendar`] module), and turns drag-and-drop events ([`drag`]) and forms ([`form`]) into updates.

pub mod traits;

mod task;
pub use task::{NewTask, Priority, Task, TaskId, TaskStatus};
mod user;
pub use user::{NewUser, User, UserId};

pub mod calendar;
pub mod drag;
pub mod form;
pub mod scheduler;
pub use scheduler::Scheduler;

pub mod client;
pub mod cache;
pub mod mock_behaviour;

pub mod config;
pub mod utils;
