use crate::api::ApiError;
use crate::domain::{
    active_count, all_completed, has_completed, set_loading, visible_rows, ErrorKind, Filter, Focus, PendingTask,
    Row, Task, TaskId, TaskPatch,
};
use crate::row::{Commit, RowEditor};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Work the runner must perform against the task store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Load,
    Create { title: String },
    Update { id: TaskId, patch: TaskPatch },
    Delete { id: TaskId },
    /// Bulk delete; settles as a single outcome
    DeleteMany { ids: Vec<TaskId> },
    /// Bulk completion change; settles as a single outcome
    UpdateMany { ids: Vec<TaskId>, completed: bool },
}

/// A settled request, fed back through `AppState::apply`
#[derive(Debug)]
pub enum Outcome {
    Loaded(Result<Vec<Task>, ApiError>),
    Created(Result<Task, ApiError>),
    Updated { id: TaskId, result: Result<Task, ApiError> },
    Deleted { id: TaskId, result: Result<(), ApiError> },
    DeletedMany(Vec<(TaskId, Result<(), ApiError>)>),
    UpdatedMany(Vec<(TaskId, Result<Task, ApiError>)>),
}

/// The error currently shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub kind: ErrorKind,
    pub shown_at: Instant,
}

impl Notification {
    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}

/// Main application state
pub struct AppState {
    pub tasks: Vec<Task>,
    /// Placeholder shown while a create request is outstanding
    pub pending: Option<PendingTask>,
    /// New-task input contents
    pub draft: String,
    pub filter: Filter,
    pub notification: Option<Notification>,
    pub notification_timeout: Duration,
    pub focus: Focus,
    /// Index into the visible rows
    pub selected_index: usize,
    pub editor: Option<RowEditor>,
}

impl AppState {
    pub fn new(notification_timeout: Duration) -> Self {
        Self {
            tasks: Vec::new(),
            pending: None,
            draft: String::new(),
            filter: Filter::All,
            notification: None,
            notification_timeout,
            focus: Focus::NewTask,
            selected_index: 0,
            editor: None,
        }
    }

    /// Initial fetch, issued once at startup
    pub fn load(&self) -> Request {
        Request::Load
    }

    pub fn visible_rows(&self) -> Vec<Row<'_>> {
        visible_rows(&self.tasks, self.filter, self.pending.as_ref())
    }

    pub fn active_count(&self) -> usize {
        active_count(&self.tasks)
    }

    pub fn has_completed(&self) -> bool {
        has_completed(&self.tasks)
    }

    pub fn all_completed(&self) -> bool {
        all_completed(&self.tasks)
    }

    /// The new-task input is disabled while a create is in flight
    pub fn is_creating(&self) -> bool {
        self.pending.is_some()
    }

    fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Id of the selected row, if it is a confirmed task
    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.visible_rows()
            .get(self.selected_index)
            .and_then(|row| row.task())
            .map(|task| task.id)
    }

    /// Show an error, replacing any current one
    pub fn report(&mut self, kind: ErrorKind) {
        debug!(?kind, "AppState::report: called");
        self.notification = Some(Notification {
            kind,
            shown_at: Instant::now(),
        });
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Hide the notification once it has been visible long enough
    pub fn tick(&mut self, now: Instant) {
        if let Some(notification) = self.notification {
            if now.saturating_duration_since(notification.shown_at) >= self.notification_timeout {
                self.notification = None;
            }
        }
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.visible_rows().len() {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_rows().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.clamp_selection();
    }

    pub fn cycle_filter(&mut self) {
        self.set_filter(self.filter.next());
    }

    /// Switch between the new-task input and the list.
    /// Leaving the list while editing commits the edit, like a blur.
    pub fn toggle_focus(&mut self) -> Option<Request> {
        match self.focus {
            Focus::NewTask => {
                self.focus = Focus::List;
                None
            }
            Focus::List => {
                let request = if self.editor.is_some() { self.commit_edit() } else { None };
                if self.editor.is_none() {
                    self.focus = Focus::NewTask;
                }
                request
            }
        }
    }

    pub fn input_char(&mut self, c: char) {
        if !self.is_creating() {
            self.draft.push(c);
        }
    }

    pub fn input_backspace(&mut self) {
        if !self.is_creating() {
            self.draft.pop();
        }
    }

    /// Validate the draft and start a create with a placeholder row
    pub fn submit_new_task(&mut self) -> Option<Request> {
        if self.is_creating() {
            return None;
        }

        let title = self.draft.trim().to_string();
        if title.is_empty() {
            self.report(ErrorKind::EmptyTitle);
            return None;
        }

        debug!(%title, "AppState::submit_new_task: creating");
        self.pending = Some(PendingTask { title: title.clone() });
        Some(Request::Create { title })
    }

    /// Mark a task loading and request its deletion
    pub fn delete_task(&mut self, id: TaskId) -> Option<Request> {
        let task = self.task(id)?;
        if task.loading {
            return None;
        }

        self.tasks = set_loading(&self.tasks, &[id], true);
        Some(Request::Delete { id })
    }

    pub fn delete_selected(&mut self) -> Option<Request> {
        let id = self.selected_task_id()?;
        self.delete_task(id)
    }

    /// Flip completion of one task
    pub fn toggle_task(&mut self, id: TaskId) -> Option<Request> {
        let task = self.task(id)?;
        if task.loading {
            return None;
        }

        let patch = TaskPatch::completed(!task.completed);
        self.tasks = set_loading(&self.tasks, &[id], true);
        Some(Request::Update { id, patch })
    }

    pub fn toggle_selected(&mut self) -> Option<Request> {
        let id = self.selected_task_id()?;
        self.toggle_task(id)
    }

    pub fn begin_edit_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        let editor = self.task(id).filter(|task| !task.loading).map(RowEditor::begin);
        if editor.is_some() {
            self.editor = editor;
        }
    }

    pub fn edit_char(&mut self, c: char) {
        if let Some(editor) = self.editor.as_mut() {
            editor.push(c);
        }
    }

    pub fn edit_backspace(&mut self) {
        if let Some(editor) = self.editor.as_mut() {
            editor.pop();
        }
    }

    /// Commit the open editor: delete on blank, close on unchanged, otherwise rename
    pub fn commit_edit(&mut self) -> Option<Request> {
        let editor = self.editor.as_ref()?;
        let id = editor.id;

        let Some(task) = self.task(id) else {
            self.editor = None;
            return None;
        };
        if task.loading {
            return None;
        }

        let commit = editor.commit(&task.title);
        match commit {
            Commit::Delete => self.delete_task(id),
            Commit::Unchanged => {
                self.editor = None;
                None
            }
            Commit::Rename(title) => {
                self.tasks = set_loading(&self.tasks, &[id], true);
                Some(Request::Update {
                    id,
                    patch: TaskPatch::title(title),
                })
            }
        }
    }

    /// Discard the draft without touching the store
    pub fn cancel_edit(&mut self) {
        if let Some(editor) = self.editor.take() {
            debug!(id = %editor.id, draft = %editor.draft, "AppState::cancel_edit: discarded");
        }
    }

    /// Delete every completed task
    pub fn clear_completed(&mut self) -> Option<Request> {
        let ids: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|task| task.completed && !task.loading)
            .map(|task| task.id)
            .collect();
        if ids.is_empty() {
            return None;
        }

        self.tasks = set_loading(&self.tasks, &ids, true);
        Some(Request::DeleteMany { ids })
    }

    /// Complete every incomplete task, or un-complete everything when all are done.
    /// The target set is derived from current state on every call.
    pub fn toggle_all(&mut self) -> Option<Request> {
        if self.tasks.is_empty() {
            return None;
        }

        let all_done = self.all_completed();
        let ids: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|task| !task.loading && (all_done || !task.completed))
            .map(|task| task.id)
            .collect();
        if ids.is_empty() {
            return None;
        }

        self.tasks = set_loading(&self.tasks, &ids, true);
        Some(Request::UpdateMany {
            ids,
            completed: !all_done,
        })
    }

    /// Fold a settled request back into local state
    pub fn apply(&mut self, outcome: Outcome) {
        let len_before = self.tasks.len();
        let was_creating = self.is_creating();

        match outcome {
            Outcome::Loaded(Ok(tasks)) => {
                debug!(count = tasks.len(), "AppState::apply: loaded");
                self.tasks = tasks;
            }
            Outcome::Loaded(Err(e)) => {
                warn!(error = %e, status = ?e.status(), "load failed");
                self.report(ErrorKind::Load);
            }
            Outcome::Created(result) => {
                self.pending = None;
                match result {
                    Ok(task) => {
                        debug!(id = %task.id, "AppState::apply: created");
                        self.tasks.push(Task { loading: false, ..task });
                        self.draft.clear();
                    }
                    Err(e) => {
                        warn!(error = %e, status = ?e.status(), "create failed");
                        self.report(ErrorKind::Create);
                    }
                }
            }
            Outcome::Updated { id, result } => {
                match result {
                    Ok(updated) => {
                        self.merge(updated);
                        if self.editor.as_ref().is_some_and(|editor| editor.id == id) {
                            self.editor = None;
                        }
                    }
                    Err(e) => {
                        warn!(%id, error = %e, status = ?e.status(), "update failed");
                        self.report(ErrorKind::Update);
                    }
                }
                self.tasks = set_loading(&self.tasks, &[id], false);
            }
            Outcome::Deleted { id, result } => match result {
                Ok(()) => {
                    self.tasks.retain(|task| task.id != id);
                    if self.editor.as_ref().is_some_and(|editor| editor.id == id) {
                        self.editor = None;
                    }
                }
                Err(e) => {
                    warn!(%id, error = %e, status = ?e.status(), "delete failed");
                    self.report(ErrorKind::Delete);
                    self.tasks = set_loading(&self.tasks, &[id], false);
                }
            },
            Outcome::DeletedMany(results) => {
                let targeted: Vec<TaskId> = results.iter().map(|(id, _)| *id).collect();
                let mut removed = Vec::new();
                let mut failed = 0;
                for (id, result) in results {
                    match result {
                        Ok(()) => removed.push(id),
                        Err(e) => {
                            warn!(%id, error = %e, "bulk delete failed for task");
                            failed += 1;
                        }
                    }
                }
                debug!(removed = removed.len(), failed, "AppState::apply: bulk delete settled");

                if failed > 0 {
                    self.report(ErrorKind::Delete);
                }
                self.tasks.retain(|task| !removed.contains(&task.id));
                self.tasks = set_loading(&self.tasks, &targeted, false);
            }
            Outcome::UpdatedMany(results) => {
                let targeted: Vec<TaskId> = results.iter().map(|(id, _)| *id).collect();
                let mut failed = 0;
                for (id, result) in results {
                    match result {
                        Ok(updated) => self.merge(updated),
                        Err(e) => {
                            warn!(%id, error = %e, "bulk update failed for task");
                            failed += 1;
                        }
                    }
                }
                debug!(targeted = targeted.len(), failed, "AppState::apply: bulk update settled");

                if failed > 0 {
                    self.report(ErrorKind::Update);
                }
                self.tasks = set_loading(&self.tasks, &targeted, false);
            }
        }

        self.clamp_selection();

        let settled_add_or_remove = self.tasks.len() != len_before || (was_creating && !self.is_creating());
        if settled_add_or_remove && !self.is_creating() && self.editor.is_none() {
            self.focus = Focus::NewTask;
        }
    }

    /// Replace the stored task with the store's version, loading cleared
    fn merge(&mut self, updated: Task) {
        if let Some(task) = self.tasks.iter_mut().find(|task| task.id == updated.id) {
            *task = Task {
                loading: false,
                ..updated
            };
        }
    }
}
