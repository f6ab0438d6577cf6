//! This module provides the scheduler, which owns the task list
//!
//! The scheduler is the single owner of the list of tasks. Views only ever borrow it (through projections).
//! Every mutation (creation, edition, drag-and-drop) is sent to the [`TaskSource`], and then followed by a full resync: the whole list is fetched again
//! and replaces the local one. The local list is never patched in place.

use std::future::Future;

use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;

use crate::calendar::month::MonthCursor;
use crate::calendar::status::{tasks_with_status, StatusCounts};
use crate::calendar::week::week_projection;
use crate::calendar::{first_of_month, DayBucket};
use crate::drag::{resolve_move, BucketLayout, MoveEvent};
use crate::form::{FormError, TaskForm};
use crate::task::{Task, TaskId, TaskStatus};
use crate::traits::TaskSource;

pub mod load_progress;
pub mod view;

use load_progress::{FeedbackSender, LoadState};
use view::{ViewKind, YearProjection, YearView};

/// What happened to a mutation request
#[derive(Clone, Debug, PartialEq)]
pub enum MutationOutcome {
    /// The source accepted the change, and the task list has been resynced. This holds the task as the source returned it
    Applied(Task),
    /// The form did not pass validation. Nothing has been sent
    Rejected(FormError),
    /// There was nothing to do (e.g. a task dropped back into its own bucket). Nothing has been sent
    Ignored,
    /// The source returned an error (it has been logged). The task list is left as it was
    Failed,
    /// The view that started this request went away before it completed. If the source had already accepted the change, the task list has still been resynced
    Discarded,
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied(_))
    }
}


/// Holds the task list, mirrors it from a [`TaskSource`] and projects it into calendar views.
///
/// `source` is usually a [`Client`](crate::client::Client), but can be a [`LocalStore`](crate::cache::LocalStore) for offline use or tests.
#[derive(Debug)]
pub struct Scheduler<S: TaskSource> {
    source: S,
    tasks: Vec<Task>,
    load_state: LoadState,
    feedback_channel: Option<FeedbackSender>,

    current_view: ViewKind,
    month_view: MonthCursor,
    year_view: YearView,
}

impl<S: TaskSource> Scheduler<S> {
    /// Create a scheduler. This does not fetch anything, see [`Self::load`]
    pub fn new(source: S) -> Self {
        Self {
            source,
            tasks: Vec::new(),
            load_state: LoadState::NotStarted,
            feedback_channel: None,
            current_view: ViewKind::default(),
            month_view: MonthCursor::today(),
            year_view: YearView::default(),
        }
    }

    /// Create a scheduler that reports its load state changes to a [`feedback_channel`](load_progress::feedback_channel)
    pub fn new_with_feedback_channel(source: S, channel: FeedbackSender) -> Self {
        Self {
            feedback_channel: Some(channel),
            ..Self::new(source)
        }
    }

    pub fn source(&self) -> &S { &self.source }
    pub fn source_mut(&mut self) -> &mut S { &mut self.source }

    /// The tasks, as they were at the last successful fetch
    pub fn tasks(&self) -> &[Task] { &self.tasks }

    pub fn load_state(&self) -> &LoadState { &self.load_state }

    /// The message to display in case the last fetch failed
    pub fn error_banner(&self) -> Option<&str> {
        match &self.load_state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    fn set_load_state(&mut self, state: LoadState) {
        if let Some(sender) = &self.feedback_channel {
            // Nobody listening is not an error
            let _ = sender.send(state.clone());
        }
        self.load_state = state;
    }


    //
    // Views
    //

    pub fn current_view(&self) -> ViewKind { self.current_view }

    pub fn switch_view(&mut self, view: ViewKind) {
        log::debug!("Switching to the {} view", view);
        self.current_view = view;
    }

    /// The week that contains `today`, starting with `today`
    pub fn week(&self, today: NaiveDate) -> Vec<DayBucket<'_>> {
        week_projection(&self.tasks, today)
    }

    pub fn month_view(&self) -> &MonthCursor { &self.month_view }
    pub fn month_view_mut(&mut self) -> &mut MonthCursor { &mut self.month_view }

    /// Every day of the month of the month view
    pub fn month(&self) -> Vec<DayBucket<'_>> {
        self.month_view.project(&self.tasks)
    }

    pub fn year_view(&self) -> &YearView { &self.year_view }
    pub fn year_view_mut(&mut self) -> &mut YearView { &mut self.year_view }

    /// Either the twelve months of the year view, or the month it is drilled into
    pub fn year(&self) -> YearProjection<'_> {
        self.year_view.project(&self.tasks)
    }

    /// The tasks with a given status, sorted by date
    pub fn tasks_by_status(&self, status: TaskStatus) -> Vec<&Task> {
        tasks_with_status(&self.tasks, status)
    }

    pub fn status_counts(&self) -> StatusCounts {
        StatusCounts::of(&self.tasks)
    }


    //
    // Fetching
    //

    /// Initial fetch of the task list.
    ///
    /// In case of failure, the task list stays empty and [`Self::error_banner`] tells the user. Returns whether the load succeeded.
    pub async fn load(&mut self) -> bool {
        self.set_load_state(LoadState::Loading);
        self.fetch_all(None).await == Some(true)
    }

    /// Fetch the whole task list again, and replace the local one with it.
    ///
    /// In case of failure, the previous list is kept. Returns whether the resync succeeded.
    pub async fn resync(&mut self) -> bool {
        self.fetch_all(None).await == Some(true)
    }

    /// Returns `None` if the fetch has been cancelled, or whether it succeeded
    async fn fetch_all(&mut self, token: Option<&CancellationToken>) -> Option<bool> {
        let fetched = guarded(token, self.source.get_tasks()).await?;
        match fetched {
            Ok(tasks) => {
                log::info!("Task list resynced ({} tasks)", tasks.len());
                self.tasks = tasks;
                self.set_load_state(LoadState::Ready);
                Some(true)
            },
            Err(err) => {
                log::error!("Error fetching tasks: {}", err);
                self.set_load_state(LoadState::Failed(crate::config::load_error_message()));
                Some(false)
            },
        }
    }


    //
    // Mutations
    //

    /// Create a task from a creation form. An invalid form is rejected before anything is sent
    pub async fn create_task(&mut self, form: &TaskForm) -> MutationOutcome {
        self.create_task_inner(form, None).await
    }

    /// Same as [`Self::create_task`], but the result is discarded if `token` is cancelled before it completes
    pub async fn create_task_guarded(&mut self, form: &TaskForm, token: &CancellationToken) -> MutationOutcome {
        self.create_task_inner(form, Some(token)).await
    }

    /// Replace the task `task_id` with the content of an edition form
    pub async fn save_task(&mut self, task_id: &TaskId, form: &TaskForm) -> MutationOutcome {
        self.save_task_inner(task_id, form, None).await
    }

    /// Same as [`Self::save_task`], but the result is discarded if `token` is cancelled before it completes
    pub async fn save_task_guarded(&mut self, task_id: &TaskId, form: &TaskForm, token: &CancellationToken) -> MutationOutcome {
        self.save_task_inner(task_id, form, Some(token)).await
    }

    /// Handle a drop in a view that displays the buckets of `layout`.
    ///
    /// See [`resolve_move`] for the cases where nothing is sent.
    pub async fn apply_move(&mut self, layout: &BucketLayout, event: &MoveEvent) -> MutationOutcome {
        self.apply_move_inner(layout, event, None).await
    }

    /// Same as [`Self::apply_move`], but the result is discarded if `token` is cancelled before it completes
    pub async fn apply_move_guarded(&mut self, layout: &BucketLayout, event: &MoveEvent, token: &CancellationToken) -> MutationOutcome {
        self.apply_move_inner(layout, event, Some(token)).await
    }

    /// Handle a drop between two months of the year view.
    ///
    /// The task keeps its day of month (clamped to the end of the destination month), and the year view drills into the destination month.
    pub async fn apply_year_move(&mut self, event: &MoveEvent) -> MutationOutcome {
        self.apply_year_move_inner(event, None).await
    }

    /// Same as [`Self::apply_year_move`], but the result is discarded if `token` is cancelled before it completes
    pub async fn apply_year_move_guarded(&mut self, event: &MoveEvent, token: &CancellationToken) -> MutationOutcome {
        self.apply_year_move_inner(event, Some(token)).await
    }

    async fn create_task_inner(&mut self, form: &TaskForm, token: Option<&CancellationToken>) -> MutationOutcome {
        let fields = match form.validate() {
            Err(err) => {
                log::info!("Task form rejected: {}", err);
                return MutationOutcome::Rejected(err);
            },
            Ok(fields) => fields,
        };

        let created = match guarded(token, self.source.create_task(fields)).await {
            None => return discarded("task creation"),
            Some(Err(err)) => {
                log::error!("Error creating task: {}", err);
                return MutationOutcome::Failed;
            },
            Some(Ok(task)) => task,
        };
        self.resync_after(created, token).await
    }

    async fn save_task_inner(&mut self, task_id: &TaskId, form: &TaskForm, token: Option<&CancellationToken>) -> MutationOutcome {
        let task = match self.tasks.iter().find(|t| t.id() == task_id) {
            None => {
                log::debug!("Cannot save unknown task {}", task_id);
                return MutationOutcome::Ignored;
            },
            Some(task) => task,
        };
        let updated = match form.into_update(task) {
            Err(err) => {
                log::info!("Task form rejected: {}", err);
                return MutationOutcome::Rejected(err);
            },
            Ok(updated) => updated,
        };
        self.push_update(updated, token).await
    }

    async fn apply_year_move_inner(&mut self, event: &MoveEvent, token: Option<&CancellationToken>) -> MutationOutcome {
        let layout = BucketLayout::Months(self.year_view.cursor().months());
        let updated = match resolve_move(&layout, event, &self.tasks) {
            None => return MutationOutcome::Ignored,
            Some(task) => task,
        };
        self.year_view.drill_into(first_of_month(updated.date()));
        self.push_update(updated, token).await
    }

    async fn apply_move_inner(&mut self, layout: &BucketLayout, event: &MoveEvent, token: Option<&CancellationToken>) -> MutationOutcome {
        match resolve_move(layout, event, &self.tasks) {
            None => MutationOutcome::Ignored,
            Some(updated) => self.push_update(updated, token).await,
        }
    }

    async fn push_update(&mut self, task: Task, token: Option<&CancellationToken>) -> MutationOutcome {
        let updated = match guarded(token, self.source.update_task(&task)).await {
            None => return discarded("task update"),
            Some(Err(err)) => {
                log::error!("Error updating task {}: {}", task.id(), err);
                return MutationOutcome::Failed;
            },
            Some(Ok(updated)) => updated,
        };
        self.resync_after(updated, token).await
    }

    /// The remote call went through: the list is resynced even if the view is gone, so that it matches the source again
    async fn resync_after(&mut self, task: Task, token: Option<&CancellationToken>) -> MutationOutcome {
        self.fetch_all(None).await;
        match token {
            Some(token) if token.is_cancelled() => discarded("result"),
            _ => MutationOutcome::Applied(task),
        }
    }
}

fn discarded(what: &str) -> MutationOutcome {
    log::debug!("The view went away, discarding the {}", what);
    MutationOutcome::Discarded
}

/// Run `future`, unless `token` gets cancelled first (in which case `future` is dropped and this returns `None`)
async fn guarded<F, T>(token: Option<&CancellationToken>, future: F) -> Option<T>
where
    F: Future<Output = T>,
{
    match token {
        None => Some(future.await),
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => None,
            output = future => Some(output),
        },
    }
}
