//! This is an example of how planboard can be used.
//! It loads the tasks from the server, and prints the week, month and year calendars.

use chrono::Local;

use planboard::client::Client;
use planboard::scheduler::load_progress::feedback_channel;
use planboard::Scheduler;


#[tokio::main]
async fn main() {
    env_logger::init();

    println!("This example loads tasks from {}.", planboard::config::API_ORIGIN.lock().unwrap());
    println!("You can set the RUST_LOG environment variable to display more info about the requests.");

    let client = Client::from_config().unwrap();
    let (sender, receiver) = feedback_channel();
    let mut scheduler = Scheduler::new_with_feedback_channel(client, sender);

    if scheduler.load().await == false {
        println!("{}", *receiver.borrow());
        return;
    }

    let today = Local::now().date_naive();

    println!("---- This week -----");
    planboard::utils::print_day_buckets(&scheduler.week(today), today);

    println!("---- {} -----", scheduler.month_view().title());
    let days_with_tasks: Vec<_> = scheduler.month().into_iter()
        .filter(|day| day.tasks.is_empty() == false)
        .collect();
    planboard::utils::print_day_buckets(&days_with_tasks, today);

    println!("---- {} -----", scheduler.year_view().cursor().title());
    planboard::utils::print_year(&scheduler.year(), today);

    let counts = scheduler.status_counts();
    println!("{} pending, {} in progress, {} completed", counts.pending, counts.in_progress, counts.completed);
}
