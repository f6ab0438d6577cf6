//! Utilities to track the loading state of a scheduler

use std::fmt::{Display, Error, Formatter};

/// Where the task list of a [`Scheduler`](crate::scheduler::Scheduler) comes from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing has been fetched yet
    NotStarted,
    /// The initial fetch is in flight. A UI would show a loading indicator
    Loading,
    /// The task list mirrors the last successful fetch
    Ready,
    /// The last fetch failed. The message is meant to be displayed as a banner
    Failed(String),
}

impl Display for LoadState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            LoadState::NotStarted => write!(f, "Not started"),
            LoadState::Loading => write!(f, "Loading tasks..."),
            LoadState::Ready => write!(f, "Tasks loaded"),
            LoadState::Failed(message) => write!(f, "{}", message),
        }
    }
}

impl Default for LoadState {
    fn default() -> Self {
        Self::NotStarted
    }
}



/// See [`feedback_channel`]
pub type FeedbackSender = tokio::sync::watch::Sender<LoadState>;
/// See [`feedback_channel`]
pub type FeedbackReceiver = tokio::sync::watch::Receiver<LoadState>;

/// Create a feedback channel, that can be used to follow the load state of a scheduler (e.g. to display a loading indicator)
pub fn feedback_channel() -> (FeedbackSender, FeedbackReceiver) {
    tokio::sync::watch::channel(LoadState::default())
}
