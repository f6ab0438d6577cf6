//! This is an example of how planboard can be used.
//! This binary creates a task for today, then moves it to tomorrow, the way a drag-and-drop in the week view would.

use chrono::Local;

use planboard::client::Client;
use planboard::drag::{BucketLayout, MoveEvent};
use planboard::form::TaskForm;
use planboard::scheduler::MutationOutcome;
use planboard::utils::pause;
use planboard::Scheduler;


#[tokio::main]
async fn main() {
    env_logger::init();

    println!("This example creates a task on the server at {}, then reschedules it.", planboard::config::API_ORIGIN.lock().unwrap());
    pause();

    let mut scheduler = Scheduler::new(Client::from_config().unwrap());
    if scheduler.load().await == false {
        println!("{}", scheduler.error_banner().unwrap_or_default());
        return;
    }

    let today = Local::now().date_naive();
    let form = TaskForm {
        title: String::from("Try planboard"),
        description: String::from("Created by the reschedule example"),
        ..TaskForm::new(today)
    };
    let created = match scheduler.create_task(&form).await {
        MutationOutcome::Applied(task) => task,
        other => {
            println!("Unable to create the task: {:?}", other);
            return;
        },
    };
    println!("Created task {}", created.id());

    // In the week view, today is the first bucket, and the next one is tomorrow (unless today is a Sunday)
    let layout = BucketLayout::from(&scheduler.week(today)[..]);
    let outcome = scheduler.apply_move(&layout, &MoveEvent::new(created.id().clone(), 0, Some(1))).await;
    println!("Moving it to the next bucket: {:?}", outcome);

    planboard::utils::print_day_buckets(&scheduler.week(today), today);
}
