//! This module provides ways to tweak a [`LocalStore`](crate::cache::LocalStore), so that it can return errors on some tests

use std::error::Error;

/// Failure injection for a local store.
///
/// Each operation has a `(m, n)` pair: it succeeds `m` times, then fails `n` times, then succeeds again.
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// Let every operation through, without touching the counters
    pub is_suspended: bool,

    // From the TaskSource trait
    pub get_tasks_behaviour: (u32, u32),
    pub create_task_behaviour: (u32, u32),
    pub update_task_behaviour: (u32, u32),

    // From the UserSource trait
    pub get_users_behaviour: (u32, u32),
    pub create_user_behaviour: (u32, u32),
    pub update_user_behaviour: (u32, u32),
    pub delete_user_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation fails its next `n_fails` calls
    pub fn fail_now(n_fails: u32) -> Self {
        let now = (0, n_fails);
        Self {
            is_suspended: false,
            get_tasks_behaviour: now,
            create_task_behaviour: now,
            update_task_behaviour: now,
            get_users_behaviour: now,
            create_user_behaviour: now,
            update_user_behaviour: now,
            delete_user_behaviour: now,
        }
    }

    /// Let everything through until [`Self::resume`] is called
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_get_tasks(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.get_tasks_behaviour, "get_tasks")
    }
    pub fn can_create_task(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.create_task_behaviour, "create_task")
    }
    pub fn can_update_task(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.update_task_behaviour, "update_task")
    }
    pub fn can_get_users(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.get_users_behaviour, "get_users")
    }
    pub fn can_create_user(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.create_user_behaviour, "create_user")
    }
    pub fn can_update_user(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.update_user_behaviour, "update_user")
    }
    pub fn can_delete_user(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.delete_user_behaviour, "delete_user")
    }
}


/// `(successes, failures)`: let the first `successes` calls through, then fail the next `failures` ones, then let everything through
fn decrement(counters: &mut (u32, u32), operation: &str) -> Result<(), Box<dyn Error>> {
    match counters {
        (0, 0) => Ok(()),
        (0, failures) => {
            *failures -= 1;
            log::debug!("Mock behaviour: {} refused, {} more failure(s) to come", operation, failures);
            Err(format!("{} failed on purpose (mock behaviour)", operation).into())
        },
        (successes, _) => {
            *successes -= 1;
            log::debug!("Mock behaviour: {} let through", operation);
            Ok(())
        },
    }
}
