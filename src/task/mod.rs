//! Task entity and the in-memory task store.

mod resource;
mod seed;
mod store;

pub use resource::{Task, TaskDraft};
pub use seed::seed_tasks;
pub use store::{TaskStore, Tasks};
