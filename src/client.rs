//! This module provides a client to connect to the task server

use std::error::Error;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Response;
use url::Url;

use crate::task::{NewTask, Task};
use crate::traits::{TaskSource, UserSource};
use crate::user::{NewUser, User, UserId};

const TASKS_COLLECTION: &str = "tasks";
const USERS_COLLECTION: &str = "users";


/// A task source that fetches its data from a REST server.
///
/// The server exposes JSON collections (`/tasks` and `/users`), each supporting `GET /{collection}`, `POST /{collection}` and `PUT /{collection}/{id}`.
#[derive(Debug, Clone)]
pub struct Client {
    origin: Url,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(origin: S) -> Result<Self, Box<dyn Error>> {
        let origin = Url::parse(origin.as_ref())?;
        if origin.cannot_be_a_base() {
            return Err(format!("{} cannot be used as a server origin", origin).into());
        }

        Ok(Self{
            origin,
            http: reqwest::Client::new(),
        })
    }

    /// Create a client for the server configured in [`API_ORIGIN`](crate::config::API_ORIGIN)
    pub fn from_config() -> Result<Self, Box<dyn Error>> {
        Self::new(crate::config::api_origin())
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Build `{origin}/{segments...}`, percent-encoding every segment
    fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.origin.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(segments);
        }
        url
    }

    async fn get_collection<T>(&self, collection: &str) -> Result<Vec<T>, Box<dyn Error>>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.url_for(&[collection]);
        log::debug!("GET {}", url);
        let response = self.http
            .get(url)
            .send()
            .await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }

    async fn post_item<B, T>(&self, collection: &str, body: &B) -> Result<T, Box<dyn Error>>
    where
        B: serde::Serialize + Sync,
        T: serde::de::DeserializeOwned,
    {
        let url = self.url_for(&[collection]);
        log::debug!("POST {}", url);
        let response = self.http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }

    async fn put_item<B, T>(&self, collection: &str, id: &str, body: &B) -> Result<T, Box<dyn Error>>
    where
        B: serde::Serialize + Sync,
        T: serde::de::DeserializeOwned,
    {
        let url = self.url_for(&[collection, id]);
        log::debug!("PUT {}", url);
        let response = self.http
            .put(url)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }
}

fn check_status(response: Response) -> Result<Response, Box<dyn Error>> {
    if response.status().is_success() == false {
        return Err(format!("Unexpected HTTP status code {:?} (for {})", response.status(), response.url()).into());
    }
    Ok(response)
}

#[async_trait]
impl TaskSource for Client {
    async fn get_tasks(&self) -> Result<Vec<Task>, Box<dyn Error>> {
        let tasks: Vec<Task> = self.get_collection(TASKS_COLLECTION).await?;
        log::info!("Fetched {} tasks from {}", tasks.len(), self.origin);
        Ok(tasks)
    }

    async fn create_task(&mut self, task: NewTask) -> Result<Task, Box<dyn Error>> {
        let created: Task = self.post_item(TASKS_COLLECTION, &task).await?;
        log::info!("Created task {} ({})", created.id(), created.title());
        Ok(created)
    }

    async fn update_task(&mut self, task: &Task) -> Result<Task, Box<dyn Error>> {
        let updated: Task = self.put_item(TASKS_COLLECTION, task.id().as_str(), task).await?;
        log::info!("Updated task {}", updated.id());
        Ok(updated)
    }
}

#[async_trait]
impl UserSource for Client {
    async fn get_users(&self) -> Result<Vec<User>, Box<dyn Error>> {
        self.get_collection(USERS_COLLECTION).await
    }

    async fn create_user(&mut self, user: NewUser) -> Result<User, Box<dyn Error>> {
        self.post_item(USERS_COLLECTION, &user).await
    }

    async fn update_user(&mut self, id: UserId, user: NewUser) -> Result<User, Box<dyn Error>> {
        self.put_item(USERS_COLLECTION, &id.to_string(), &user).await
    }

    async fn delete_user(&mut self, id: UserId) -> Result<(), Box<dyn Error>> {
        let url = self.url_for(&[USERS_COLLECTION, &id.to_string()]);
        log::debug!("DELETE {}", url);
        let response = self.http
            .delete(url)
            .send()
            .await?;
        check_status(response)?;
        Ok(())
    }
}
