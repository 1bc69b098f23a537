use crate::domain::{Task, TaskId};

/// Inline rename state for a single row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowEditor {
    pub id: TaskId,
    pub draft: String,
}

/// What committing an edit should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit {
    /// Blank title: delete the task instead
    Delete,
    /// Same title after trimming: just close the editor
    Unchanged,
    Rename(String),
}

impl RowEditor {
    /// Start editing with the draft seeded from the current title
    pub fn begin(task: &Task) -> Self {
        Self {
            id: task.id,
            draft: task.title.clone(),
        }
    }

    pub fn push(&mut self, c: char) {
        self.draft.push(c);
    }

    pub fn pop(&mut self) {
        self.draft.pop();
    }

    /// Classify the draft against the task's current title
    pub fn commit(&self, current_title: &str) -> Commit {
        let trimmed = self.draft.trim();
        if trimmed.is_empty() {
            Commit::Delete
        } else if trimmed == current_title {
            Commit::Unchanged
        } else {
            Commit::Rename(trimmed.to_string())
        }
    }
}
