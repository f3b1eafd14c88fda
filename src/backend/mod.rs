//! Asynchronous boundary to the task backend.
//!
//! Every remote operation is a future so a networked implementation can
//! replace [`SimulatedBackend`], which waits a fixed latency and fabricates
//! results locally.

mod error;

pub use error::BackendError;

use crate::session::Session;
use crate::task::{seed_tasks, Task, TaskDraft};
use async_trait::async_trait;
use log::*;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

/// Remote operations the client depends on.
///
#[async_trait]
pub trait Backend: Send + Sync {
    async fn sign_in(&self, email: String, password: String) -> Result<Session, BackendError>;

    async fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<Session, BackendError>;

    async fn create_task(&self, draft: TaskDraft) -> Result<Task, BackendError>;

    async fn update_task(&self, task: Task) -> Result<Task, BackendError>;

    async fn delete_task(&self, id: i64) -> Result<(), BackendError>;

    async fn fetch_tasks(&self) -> Result<Vec<Task>, BackendError>;
}

/// Fixed delays applied by [`SimulatedBackend`].
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Latency {
    pub auth: Duration,
    pub task: Duration,
    pub refresh: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Latency {
            auth: Duration::from_millis(1500),
            task: Duration::from_millis(1000),
            refresh: Duration::from_millis(1500),
        }
    }
}

impl Latency {
    pub fn none() -> Self {
        Latency {
            auth: Duration::ZERO,
            task: Duration::ZERO,
            refresh: Duration::ZERO,
        }
    }
}

/// Local stand-in for a task API.
///
pub struct SimulatedBackend {
    latency: Latency,
    last_id: AtomicI64,
}

impl SimulatedBackend {
    pub fn new(latency: Latency) -> Self {
        SimulatedBackend {
            latency,
            last_id: AtomicI64::new(0),
        }
    }

    /// Return the creation timestamp in milliseconds, bumped past any id
    /// this backend already issued.
    ///
    fn next_id(&self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        let mut prev = self.last_id.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self
                .last_id
                .compare_exchange(prev, candidate, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }
}

#[async_trait]
impl Backend for SimulatedBackend {
    async fn sign_in(&self, email: String, _password: String) -> Result<Session, BackendError> {
        debug!("Simulating sign in for {}...", email);
        tokio::time::sleep(self.latency.auth).await;
        Ok(Session::new(email))
    }

    async fn register(
        &self,
        name: String,
        email: String,
        _password: String,
    ) -> Result<Session, BackendError> {
        debug!("Simulating registration for {}...", email);
        tokio::time::sleep(self.latency.auth).await;
        Ok(Session::new(email).with_name(name))
    }

    async fn create_task(&self, draft: TaskDraft) -> Result<Task, BackendError> {
        debug!("Simulating task creation...");
        tokio::time::sleep(self.latency.task).await;
        Ok(Task {
            id: self.next_id(),
            title: draft.title,
            description: draft.description,
        })
    }

    async fn update_task(&self, task: Task) -> Result<Task, BackendError> {
        debug!("Simulating update of task {}...", task.id);
        tokio::time::sleep(self.latency.task).await;
        Ok(task)
    }

    async fn delete_task(&self, id: i64) -> Result<(), BackendError> {
        debug!("Simulating deletion of task {}...", id);
        tokio::time::sleep(self.latency.task).await;
        Ok(())
    }

    async fn fetch_tasks(&self) -> Result<Vec<Task>, BackendError> {
        debug!("Simulating task refresh...");
        tokio::time::sleep(self.latency.refresh).await;
        Ok(seed_tasks())
    }
}
