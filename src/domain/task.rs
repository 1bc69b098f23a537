use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned by the task store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted task as returned by the task store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    pub user_id: u64,
    /// Set while a request for this task is in flight. Never sent over the wire.
    #[serde(skip)]
    pub loading: bool,
}

impl Task {
    pub fn new(id: u64, title: impl Into<String>, completed: bool, user_id: u64) -> Self {
        Self {
            id: TaskId(id),
            title: title.into(),
            completed,
            user_id,
            loading: false,
        }
    }
}

/// Body of a create request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub completed: bool,
    pub user_id: u64,
}

/// Partial update; absent fields are left untouched by the store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            completed: None,
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            title: None,
            completed: Some(completed),
        }
    }
}

/// Locally synthesized row shown while a create request is outstanding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTask {
    pub title: String,
}

/// One row of the visible list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row<'a> {
    Confirmed(&'a Task),
    Pending(&'a PendingTask),
}

impl<'a> Row<'a> {
    pub fn title(&self) -> &'a str {
        match self {
            Row::Confirmed(task) => &task.title,
            Row::Pending(pending) => &pending.title,
        }
    }

    pub fn completed(&self) -> bool {
        match self {
            Row::Confirmed(task) => task.completed,
            Row::Pending(_) => false,
        }
    }

    /// Pending rows are always loading
    pub fn loading(&self) -> bool {
        match self {
            Row::Confirmed(task) => task.loading,
            Row::Pending(_) => true,
        }
    }

    pub fn task(&self) -> Option<&'a Task> {
        match self {
            Row::Confirmed(task) => Some(task),
            Row::Pending(_) => None,
        }
    }
}
