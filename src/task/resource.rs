use fake::Dummy;
use serde::{Deserialize, Serialize};

/// Defines task data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
}

impl Task {
    pub fn new(id: i64, title: impl Into<String>, description: impl Into<String>) -> Self {
        Task {
            id,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Return a copy carrying the same id with the draft's fields applied.
    ///
    pub fn with_draft(&self, draft: &TaskDraft) -> Self {
        Task {
            id: self.id,
            title: draft.title.clone(),
            description: draft.description.clone(),
        }
    }
}

/// Validated form fields for a task that has no id yet.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
}
