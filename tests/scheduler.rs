//! Scenarios that drive a Scheduler against a local store

use std::error::Error;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;

use planboard::cache::LocalStore;
use planboard::calendar::month::MonthCursor;
use planboard::drag::{BucketLayout, MoveEvent};
use planboard::form::{FormError, TaskForm};
use planboard::mock_behaviour::MockBehaviour;
use planboard::scheduler::load_progress::{feedback_channel, FeedbackReceiver, LoadState};
use planboard::scheduler::view::{ViewKind, YearProjection, YearView};
use planboard::scheduler::MutationOutcome;
use planboard::traits::TaskSource;
use planboard::{NewTask, Priority, Scheduler, Task, TaskId, TaskStatus};


fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn task(id: &str, on: NaiveDate, start_time: &str, end_time: &str) -> Task {
    Task::new(TaskId::from(id), NewTask {
        title: format!("Task {}", id),
        description: format!("Description of {}", id),
        date: on,
        start_time: start_time.to_string(),
        end_time: end_time.to_string(),
        status: TaskStatus::Pending,
        priority: Priority::High,
    })
}

fn sample_tasks() -> Vec<Task> {
    vec![
        task("standup", date(2024, 3, 15), "09:00", "10:00"),
        task("review", date(2024, 3, 15), "08:00", "08:30"),
        task("end-of-jan", date(2024, 1, 31), "14:30", "15:00"),
    ]
}

/// A scheduler that has loaded `tasks`, with a handle on the mock behaviour of its store
async fn loaded_scheduler(tasks: Vec<Task>) -> (Scheduler<LocalStore>, Arc<Mutex<MockBehaviour>>) {
    let behaviour = Arc::new(Mutex::new(MockBehaviour::new()));
    let mut store = LocalStore::with_tasks(tasks);
    store.set_mock_behaviour(Arc::clone(&behaviour));

    let mut scheduler = Scheduler::new(store);
    assert!(scheduler.load().await);
    (scheduler, behaviour)
}


#[tokio::test]
async fn initial_load() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (sender, receiver) = feedback_channel();
    let mut scheduler = Scheduler::new_with_feedback_channel(LocalStore::with_tasks(sample_tasks()), sender);
    assert_eq!(scheduler.load_state(), &LoadState::NotStarted);

    assert!(scheduler.load().await);
    assert_eq!(scheduler.tasks(), &sample_tasks()[..]);
    assert_eq!(scheduler.load_state(), &LoadState::Ready);
    assert_eq!(*receiver.borrow(), LoadState::Ready);
    assert_eq!(scheduler.error_banner(), None);
}

#[tokio::test]
async fn failed_initial_load_shows_a_banner() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut store = LocalStore::with_tasks(sample_tasks());
    store.set_mock_behaviour(Arc::new(Mutex::new(MockBehaviour::fail_now(1))));
    let mut scheduler = Scheduler::new(store);

    assert_eq!(scheduler.load().await, false);
    assert!(scheduler.tasks().is_empty());
    assert_eq!(scheduler.is_loading(), false);
    assert_eq!(scheduler.error_banner(), Some("Error loading tasks. Please try again later."));

    // Views still render, they are just empty
    assert!(scheduler.week(date(2024, 3, 15)).iter().all(|day| day.tasks.is_empty()));

    // Retrying works once the server is back
    assert!(scheduler.resync().await);
    assert_eq!(scheduler.tasks().len(), 3);
    assert_eq!(scheduler.error_banner(), None);
}

#[tokio::test]
async fn failed_resync_keeps_the_previous_list() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut scheduler, behaviour) = loaded_scheduler(sample_tasks()).await;
    behaviour.lock().unwrap().get_tasks_behaviour = (0, 1);

    assert_eq!(scheduler.resync().await, false);
    assert_eq!(scheduler.tasks(), &sample_tasks()[..]);
    assert!(scheduler.error_banner().is_some());
}

#[tokio::test]
async fn empty_titles_are_rejected_before_any_request() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut scheduler, _) = loaded_scheduler(Vec::new()).await;
    let form = TaskForm {
        description: String::from("no title"),
        ..TaskForm::new(date(2024, 3, 15))
    };

    let outcome = scheduler.create_task(&form).await;
    assert_eq!(outcome, MutationOutcome::Rejected(FormError::EmptyTitle));
    assert_eq!(scheduler.source().create_count(), 0);
    assert_eq!(scheduler.source().fetch_count(), 1);
}

#[tokio::test]
async fn creation_is_followed_by_a_resync() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut scheduler, _) = loaded_scheduler(sample_tasks()).await;
    let form = TaskForm {
        title: String::from("Dentist"),
        description: String::from("Bring the forms"),
        start_time: String::from("11:00"),
        end_time: String::from("11:45"),
        ..TaskForm::new(date(2024, 3, 15))
    };

    let created = match scheduler.create_task(&form).await {
        MutationOutcome::Applied(task) => task,
        other => panic!("Unexpected outcome {:?}", other),
    };
    assert_eq!(created.fields(), form.validate().unwrap());
    assert_eq!(scheduler.source().fetch_count(), 2);
    assert_eq!(scheduler.tasks().len(), 4);

    let today = scheduler.week(date(2024, 3, 15)).remove(0);
    let titles: Vec<&str> = today.tasks.iter().map(|t| t.title()).collect();
    assert_eq!(titles, vec!["Task review", "Task standup", "Dentist"]);
}

#[tokio::test]
async fn failed_creation_is_only_logged() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut scheduler, behaviour) = loaded_scheduler(sample_tasks()).await;
    behaviour.lock().unwrap().create_task_behaviour = (0, 1);

    let form = TaskForm {
        title: String::from("t"),
        description: String::from("d"),
        ..TaskForm::new(date(2024, 3, 15))
    };
    assert_eq!(scheduler.create_task(&form).await, MutationOutcome::Failed);
    assert_eq!(scheduler.tasks(), &sample_tasks()[..]);
    assert_eq!(scheduler.error_banner(), None);
    assert_eq!(scheduler.source().fetch_count(), 1);
}

#[tokio::test]
async fn edition_form() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut scheduler, _) = loaded_scheduler(sample_tasks()).await;
    let id = TaskId::from("standup");
    let mut form = TaskForm::from_task(&scheduler.tasks()[0]);
    form.status = TaskStatus::InProgress;
    form.title = String::from("Daily standup");

    assert!(scheduler.save_task(&id, &form).await.is_applied());
    let saved = scheduler.tasks().iter().find(|t| t.id() == &id).unwrap();
    assert_eq!(saved.title(), "Daily standup");
    assert_eq!(saved.status(), TaskStatus::InProgress);
    assert_eq!(saved.date(), date(2024, 3, 15));

    assert_eq!(scheduler.tasks_by_status(TaskStatus::InProgress).len(), 1);
    assert_eq!(scheduler.status_counts().pending, 2);

    form.end_time = String::from("25:00");
    assert!(matches!(scheduler.save_task(&id, &form).await, MutationOutcome::Rejected(_)));
    assert_eq!(scheduler.save_task(&TaskId::from("unknown"), &form).await, MutationOutcome::Ignored);
    assert_eq!(scheduler.source().update_count(), 1);
}

#[tokio::test]
async fn month_view_drop() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut scheduler, _) = loaded_scheduler(sample_tasks()).await;
    scheduler.switch_view(ViewKind::Month);
    *scheduler.month_view_mut() = MonthCursor::new(date(2024, 3, 1));

    let layout = BucketLayout::from(&scheduler.month()[..]);
    let original = scheduler.tasks()[0].clone();

    let outcome = scheduler.apply_move(&layout, &MoveEvent::new(original.id().clone(), 14, Some(19))).await;
    assert_eq!(outcome, MutationOutcome::Applied(original.with_date(date(2024, 3, 20))));

    // Only the date changed, on the store and in the resynced list
    assert_eq!(scheduler.source().tasks()[0], original.with_date(date(2024, 3, 20)));
    assert_eq!(scheduler.tasks()[0], original.with_date(date(2024, 3, 20)));
    assert_eq!(scheduler.source().update_count(), 1);

    let month = scheduler.month();
    assert_eq!(month[19].tasks.len(), 1);
    assert_eq!(month[14].tasks.len(), 1);
}

#[tokio::test]
async fn drops_into_the_same_bucket_send_nothing() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut scheduler, _) = loaded_scheduler(sample_tasks()).await;
    let today = date(2024, 3, 15);
    let layout = BucketLayout::from(&scheduler.week(today)[..]);

    let outcome = scheduler.apply_move(&layout, &MoveEvent::new(TaskId::from("standup"), 0, Some(0))).await;
    assert_eq!(outcome, MutationOutcome::Ignored);
    let outcome = scheduler.apply_move(&layout, &MoveEvent::new(TaskId::from("standup"), 0, None)).await;
    assert_eq!(outcome, MutationOutcome::Ignored);

    assert_eq!(scheduler.source().update_count(), 0);
    assert_eq!(scheduler.source().fetch_count(), 1);
    assert_eq!(scheduler.tasks(), &sample_tasks()[..]);
}

#[tokio::test]
async fn failed_drop_leaves_the_list_alone() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut scheduler, behaviour) = loaded_scheduler(sample_tasks()).await;
    behaviour.lock().unwrap().update_task_behaviour = (0, 1);
    let today = date(2024, 3, 15);
    let layout = BucketLayout::from(&scheduler.week(today)[..]);

    let outcome = scheduler.apply_move(&layout, &MoveEvent::new(TaskId::from("review"), 0, Some(3))).await;
    assert_eq!(outcome, MutationOutcome::Failed);
    assert_eq!(scheduler.tasks(), &sample_tasks()[..]);
    assert_eq!(scheduler.source().tasks(), &sample_tasks()[..]);
    assert_eq!(scheduler.source().fetch_count(), 1);
}

#[tokio::test]
async fn year_view_drop_clamps_and_drills_down() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut scheduler, _) = loaded_scheduler(sample_tasks()).await;
    scheduler.switch_view(ViewKind::Year);
    *scheduler.year_view_mut() = YearView::new(date(2024, 6, 1));

    let outcome = scheduler.apply_year_move(&MoveEvent::new(TaskId::from("end-of-jan"), 0, Some(1))).await;
    let moved = match outcome {
        MutationOutcome::Applied(task) => task,
        other => panic!("Unexpected outcome {:?}", other),
    };
    assert_eq!(moved.date(), date(2024, 2, 29));
    assert_eq!(moved, sample_tasks()[2].with_date(date(2024, 2, 29)));

    // The year view drilled into February, on its own: the scheduler still shows the year view
    assert_eq!(scheduler.current_view(), ViewKind::Year);
    assert_eq!(scheduler.year_view().expanded().map(|m| m.first_day()), Some(date(2024, 2, 1)));
    match scheduler.year() {
        YearProjection::Drilled(days) => {
            assert_eq!(days.len(), 29);
            assert_eq!(days[28].tasks.len(), 1);
        },
        other => panic!("Unexpected projection {:?}", other),
    }

    scheduler.year_view_mut().back_to_year();
    match scheduler.year() {
        YearProjection::Months(months) => {
            assert!(months[0].tasks.is_empty());
            assert_eq!(months[1].tasks.len(), 1);
            assert_eq!(months[2].tasks.len(), 2);
        },
        other => panic!("Unexpected projection {:?}", other),
    }
}

#[tokio::test]
async fn cancelled_views_discard_their_requests() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut scheduler, _) = loaded_scheduler(sample_tasks()).await;
    let today = date(2024, 3, 15);
    let layout = BucketLayout::from(&scheduler.week(today)[..]);

    let token = CancellationToken::new();
    token.cancel();

    let outcome = scheduler.apply_move_guarded(&layout, &MoveEvent::new(TaskId::from("review"), 0, Some(2)), &token).await;
    assert_eq!(outcome, MutationOutcome::Discarded);
    assert_eq!(scheduler.source().update_count(), 0);
    assert_eq!(scheduler.tasks(), &sample_tasks()[..]);

    let form = TaskForm {
        title: String::from("t"),
        description: String::from("d"),
        ..TaskForm::new(today)
    };
    assert_eq!(scheduler.create_task_guarded(&form, &token).await, MutationOutcome::Discarded);
    assert_eq!(scheduler.source().create_count(), 0);

    // A live view gets its result
    let live = CancellationToken::new();
    let outcome = scheduler.apply_move_guarded(&layout, &MoveEvent::new(TaskId::from("review"), 0, Some(2)), &live).await;
    assert!(outcome.is_applied());
    assert_eq!(scheduler.tasks()[1].date(), layout_date(&layout, 2));
}

fn layout_date(layout: &BucketLayout, index: usize) -> NaiveDate {
    match layout {
        BucketLayout::Days(days) => days[index],
        BucketLayout::Months(months) => months[index],
    }
}


/// A store whose view goes away while the server is handling a change
struct ClosingView {
    store: LocalStore,
    view: CancellationToken,
}

#[async_trait]
impl TaskSource for ClosingView {
    async fn get_tasks(&self) -> Result<Vec<Task>, Box<dyn Error>> {
        self.store.get_tasks().await
    }
    async fn create_task(&mut self, task: NewTask) -> Result<Task, Box<dyn Error>> {
        let created = self.store.create_task(task).await;
        self.view.cancel();
        created
    }
    async fn update_task(&mut self, task: &Task) -> Result<Task, Box<dyn Error>> {
        let updated = self.store.update_task(task).await;
        self.view.cancel();
        updated
    }
}

#[tokio::test]
async fn accepted_changes_are_resynced_even_if_the_view_went_away() {
    let _ = env_logger::builder().is_test(true).try_init();

    let view = CancellationToken::new();
    let source = ClosingView { store: LocalStore::with_tasks(sample_tasks()), view: view.clone() };
    let mut scheduler = Scheduler::new(source);
    assert!(scheduler.load().await);

    *scheduler.month_view_mut() = MonthCursor::new(date(2024, 3, 1));
    let layout = BucketLayout::from(&scheduler.month()[..]);
    let outcome = scheduler.apply_move_guarded(&layout, &MoveEvent::new(TaskId::from("standup"), 14, Some(19)), &view).await;

    assert_eq!(outcome, MutationOutcome::Discarded);
    assert_eq!(scheduler.source().store.tasks()[0].date(), date(2024, 3, 20));
    assert_eq!(scheduler.tasks(), scheduler.source().store.tasks());
    assert_eq!(scheduler.source().store.fetch_count(), 2);

    // Same thing for a creation
    let view = CancellationToken::new();
    scheduler.source_mut().view = view.clone();
    let form = TaskForm {
        title: String::from("Late"),
        description: String::from("Created while closing"),
        ..TaskForm::new(date(2024, 3, 18))
    };
    assert_eq!(scheduler.create_task_guarded(&form, &view).await, MutationOutcome::Discarded);
    assert_eq!(scheduler.tasks().len(), 4);
    assert_eq!(scheduler.tasks(), scheduler.source().store.tasks());
}

#[tokio::test]
async fn year_view_drops_can_be_cancelled() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut scheduler, _) = loaded_scheduler(sample_tasks()).await;
    *scheduler.year_view_mut() = YearView::new(date(2024, 6, 1));
    let event = MoveEvent::new(TaskId::from("end-of-jan"), 0, Some(1));

    let gone = CancellationToken::new();
    gone.cancel();
    assert_eq!(scheduler.apply_year_move_guarded(&event, &gone).await, MutationOutcome::Discarded);
    assert_eq!(scheduler.source().update_count(), 0);
    assert_eq!(scheduler.tasks(), &sample_tasks()[..]);

    let live = CancellationToken::new();
    assert!(scheduler.apply_year_move_guarded(&event, &live).await.is_applied());
    assert_eq!(scheduler.tasks()[2].date(), date(2024, 2, 29));

    // The server accepted the drop, then the view went away
    let view = CancellationToken::new();
    let source = ClosingView { store: LocalStore::with_tasks(sample_tasks()), view: view.clone() };
    let mut scheduler = Scheduler::new(source);
    assert!(scheduler.load().await);
    *scheduler.year_view_mut() = YearView::new(date(2024, 6, 1));
    assert_eq!(scheduler.apply_year_move_guarded(&event, &view).await, MutationOutcome::Discarded);
    assert_eq!(scheduler.tasks()[2].date(), date(2024, 2, 29));
    assert_eq!(scheduler.tasks(), scheduler.source().store.tasks());
}


/// A store that notes the load state a UI would display while each fetch is in flight
struct LoadStateRecorder {
    store: LocalStore,
    receiver: FeedbackReceiver,
    seen: Mutex<Vec<LoadState>>,
}

impl LoadStateRecorder {
    fn seen(&self) -> Vec<LoadState> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskSource for LoadStateRecorder {
    async fn get_tasks(&self) -> Result<Vec<Task>, Box<dyn Error>> {
        let state = self.receiver.borrow().clone();
        self.seen.lock().unwrap().push(state);
        self.store.get_tasks().await
    }
    async fn create_task(&mut self, task: NewTask) -> Result<Task, Box<dyn Error>> {
        self.store.create_task(task).await
    }
    async fn update_task(&mut self, task: &Task) -> Result<Task, Box<dyn Error>> {
        self.store.update_task(task).await
    }
}

#[tokio::test]
async fn only_the_initial_load_shows_a_loading_indicator() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (sender, receiver) = feedback_channel();
    let source = LoadStateRecorder {
        store: LocalStore::with_tasks(sample_tasks()),
        receiver: receiver.clone(),
        seen: Mutex::new(Vec::new()),
    };
    let mut scheduler = Scheduler::new_with_feedback_channel(source, sender);

    assert!(scheduler.load().await);
    assert_eq!(scheduler.source().seen(), vec![LoadState::Loading]);
    assert_eq!(*receiver.borrow(), LoadState::Ready);

    assert!(scheduler.resync().await);
    assert_eq!(scheduler.source().seen(), vec![LoadState::Loading, LoadState::Ready]);

    let layout = BucketLayout::from(&scheduler.week(date(2024, 3, 15))[..]);
    let outcome = scheduler.apply_move(&layout, &MoveEvent::new(TaskId::from("review"), 0, Some(1))).await;
    assert!(outcome.is_applied());
    assert_eq!(scheduler.source().seen(), vec![LoadState::Loading, LoadState::Ready, LoadState::Ready]);
    assert_eq!(scheduler.is_loading(), false);
}
