//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// The origin of the task server, used by [`Client::from_config`](crate::client::Client::from_config).
/// Feel free to override it when initing this library.
pub static API_ORIGIN: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("http://localhost:3001".to_string())));

/// The banner that a [`Scheduler`](crate::scheduler::Scheduler) exposes when it cannot load the tasks.
/// Feel free to override it when initing this library.
pub static LOAD_ERROR_MESSAGE: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("Error loading tasks. Please try again later.".to_string())));

/// Default start time of a newly created task
pub const DEFAULT_START_TIME: &str = "09:00";
/// Default end time of a newly created task
pub const DEFAULT_END_TIME: &str = "10:00";

pub(crate) fn api_origin() -> String {
    API_ORIGIN.lock().unwrap().clone()
}

pub(crate) fn load_error_message() -> String {
    LOAD_ERROR_MESSAGE.lock().unwrap().clone()
}
