//! This module provides a local store for tasks and users
//!
//! It behaves like the task server (it assigns ids, it replaces whole records on updates), but keeps everything in memory, optionally backed by a JSON file.
//! This is handy to run a [`Scheduler`](crate::scheduler::Scheduler) offline, and to stand in for the server in tests.

use std::path::PathBuf;
use std::path::Path;
use std::error::Error;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};
use async_trait::async_trait;

use crate::mock_behaviour::MockBehaviour;
use crate::task::{NewTask, Task, TaskId};
use crate::traits::{TaskSource, UserSource};
use crate::user::{NewUser, User, UserId};


/// A task source that stores its items in memory (and optionally in a local file)
#[derive(Debug, Default)]
pub struct LocalStore {
    backing_file: Option<PathBuf>,
    data: StoreData,

    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
    fetch_count: AtomicUsize,
    create_count: usize,
    update_count: usize,
}

#[derive(Default, Debug, PartialEq, Serialize, Deserialize)]
struct StoreData {
    tasks: Vec<Task>,
    users: Vec<User>,
}

impl LocalStore {
    /// Initialize an empty store, that is not backed by any file
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize a store that already contains some tasks
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let mut store = Self::new();
        store.data.tasks = tasks;
        store
    }

    /// Initialize a store from the content of a valid backing file if it exists.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let data = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(file) => serde_json::from_reader(file)?,
        };

        Ok(Self{
            backing_file: Some(PathBuf::from(path)),
            data,
            ..Self::default()
        })
    }

    /// Initialize an empty store, that will be saved to `path`
    pub fn new_with_file(path: &Path) -> Self {
        Self{
            backing_file: Some(PathBuf::from(path)),
            ..Self::default()
        }
    }

    /// Store the current content to the backing file (if any)
    pub fn save_to_file(&self) -> Result<(), Box<dyn Error>> {
        let path = match &self.backing_file {
            None => return Ok(()),
            Some(path) => path,
        };
        let file = std::fs::File::create(path)
            .map_err(|err| format!("Unable to save file {:?}: {}", path, err))?;
        serde_json::to_writer(file, &self.data)?;
        Ok(())
    }

    /// Make this store fail on purpose, as described by `behaviour`.
    /// The caller may keep a clone of the `Arc` to tweak the behaviour later on.
    pub fn set_mock_behaviour(&mut self, behaviour: Arc<Mutex<MockBehaviour>>) {
        self.mock_behaviour = Some(behaviour);
    }

    /// The tasks this store currently contains, in their insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.data.tasks
    }

    pub fn users(&self) -> &[User] {
        &self.data.users
    }

    /// How many times the task list has been requested (successfully or not)
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
    /// How many task creations have been requested (successfully or not)
    pub fn create_count(&self) -> usize {
        self.create_count
    }
    /// How many task updates have been requested (successfully or not)
    pub fn update_count(&self) -> usize {
        self.update_count
    }

    fn check_behaviour<F>(&self, check: F) -> Result<(), Box<dyn Error>>
    where
        F: FnOnce(&mut MockBehaviour) -> Result<(), Box<dyn Error>>,
    {
        match &self.mock_behaviour {
            None => Ok(()),
            Some(behaviour) => {
                let mut behaviour = behaviour.lock().unwrap();
                check(&mut *behaviour)
            },
        }
    }

    fn save_if_backed(&self) {
        if let Err(err) = self.save_to_file() {
            log::warn!("Unable to save the local store: {}", err);
        }
    }
}

#[async_trait]
impl TaskSource for LocalStore {
    async fn get_tasks(&self) -> Result<Vec<Task>, Box<dyn Error>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        self.check_behaviour(MockBehaviour::can_get_tasks)?;
        Ok(self.data.tasks.clone())
    }

    async fn create_task(&mut self, task: NewTask) -> Result<Task, Box<dyn Error>> {
        self.create_count += 1;
        self.check_behaviour(MockBehaviour::can_create_task)?;

        let created = Task::new(TaskId::random(), task);
        log::debug!("Local store: adding task {}", created.id());
        self.data.tasks.push(created.clone());
        self.save_if_backed();
        Ok(created)
    }

    async fn update_task(&mut self, task: &Task) -> Result<Task, Box<dyn Error>> {
        self.update_count += 1;
        self.check_behaviour(MockBehaviour::can_update_task)?;

        match self.data.tasks.iter_mut().find(|t| t.id() == task.id()) {
            None => Err(format!("No task with id {}", task.id()).into()),
            Some(stored) => {
                log::debug!("Local store: replacing task {}", task.id());
                *stored = task.clone();
                self.save_if_backed();
                Ok(task.clone())
            },
        }
    }
}

#[async_trait]
impl UserSource for LocalStore {
    async fn get_users(&self) -> Result<Vec<User>, Box<dyn Error>> {
        self.check_behaviour(MockBehaviour::can_get_users)?;
        Ok(self.data.users.clone())
    }

    async fn create_user(&mut self, user: NewUser) -> Result<User, Box<dyn Error>> {
        self.check_behaviour(MockBehaviour::can_create_user)?;

        let next_id = self.data.users.iter()
            .map(|u| u.id().as_u64())
            .max()
            .map(|max| max + 1)
            .unwrap_or(1);
        let created = User::new(UserId::from(next_id), user);
        self.data.users.push(created.clone());
        self.save_if_backed();
        Ok(created)
    }

    async fn update_user(&mut self, id: UserId, user: NewUser) -> Result<User, Box<dyn Error>> {
        self.check_behaviour(MockBehaviour::can_update_user)?;

        match self.data.users.iter_mut().find(|u| u.id() == id) {
            None => Err(format!("No user with id {}", id).into()),
            Some(stored) => {
                *stored = User::new(id, user);
                let updated = stored.clone();
                self.save_if_backed();
                Ok(updated)
            },
        }
    }

    async fn delete_user(&mut self, id: UserId) -> Result<(), Box<dyn Error>> {
        self.check_behaviour(MockBehaviour::can_delete_user)?;

        let n_before = self.data.users.len();
        self.data.users.retain(|u| u.id() != id);
        if self.data.users.len() == n_before {
            return Err(format!("No user with id {}", id).into());
        }
        self.save_if_backed();
        Ok(())
    }
}
