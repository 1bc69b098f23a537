//! Event loop: owns the terminal, feeds key presses to the app, and runs
//! store requests in the background.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::future::join_all;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::TaskStore;
use crate::app::{AppState, Outcome, Request};
use crate::domain::TaskPatch;
use crate::events::{Event, EventHandler, TICK_RATE};
use crate::input::{handle_key, Handled};
use crate::ui;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Perform one request against the store.
///
/// Bulk requests issue every call concurrently and wait for all of them to
/// settle; one failure never cancels the others.
pub async fn dispatch(store: &dyn TaskStore, request: Request) -> Outcome {
    debug!(?request, "dispatch: called");
    match request {
        Request::Load => Outcome::Loaded(store.list().await),
        Request::Create { title } => Outcome::Created(store.create(&title, false).await),
        Request::Update { id, patch } => Outcome::Updated {
            id,
            result: store.update(id, &patch).await,
        },
        Request::Delete { id } => Outcome::Deleted {
            id,
            result: store.delete(id).await,
        },
        Request::DeleteMany { ids } => {
            let results = join_all(ids.iter().map(|&id| store.delete(id))).await;
            Outcome::DeletedMany(ids.into_iter().zip(results).collect())
        }
        Request::UpdateMany { ids, completed } => {
            let patch = TaskPatch::completed(completed);
            let results = join_all(ids.iter().map(|&id| store.update(id, &patch))).await;
            Outcome::UpdatedMany(ids.into_iter().zip(results).collect())
        }
    }
}

/// Put the terminal into raw mode on the alternate screen
pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

pub struct Runner {
    app: AppState,
    store: Arc<dyn TaskStore>,
    events: EventHandler,
    outcome_tx: mpsc::UnboundedSender<Outcome>,
    outcome_rx: mpsc::UnboundedReceiver<Outcome>,
}

impl Runner {
    pub fn new(app: AppState, store: Arc<dyn TaskStore>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            app,
            store,
            events: EventHandler::new(TICK_RATE),
            outcome_tx,
            outcome_rx,
        }
    }

    /// Run the request in the background; its outcome arrives on the outcome channel.
    /// There is no cancellation: the task runs until the store call settles.
    fn submit(&self, request: Request) {
        let store = Arc::clone(&self.store);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = dispatch(store.as_ref(), request).await;
            if tx.send(outcome).is_err() {
                debug!("Runner::submit: receiver gone, dropping outcome");
            }
        });
    }

    pub async fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        info!("Runner::run: starting");
        self.submit(self.app.load());

        loop {
            let app = &self.app;
            terminal.draw(|f| ui::render(f, app))?;

            tokio::select! {
                event = self.events.next() => match event {
                    Some(Event::Key(key)) => match handle_key(&mut self.app, key) {
                        Handled::Quit => break,
                        Handled::Request(request) => self.submit(request),
                        Handled::Nothing => {}
                    },
                    Some(Event::Resize(w, h)) => debug!(w, h, "Runner::run: resized"),
                    Some(Event::Tick) => {}
                    None => break,
                },
                Some(outcome) = self.outcome_rx.recv() => self.app.apply(outcome),
            }

            self.app.tick(Instant::now());
        }

        info!("Runner::run: exiting");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::domain::{Task, TaskId};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use std::sync::Mutex;

    const USER: u64 = 1245;

    /// In-memory store that fails calls for selected ids
    #[derive(Default)]
    struct FakeStore {
        tasks: Mutex<Vec<Task>>,
        failing: HashSet<u64>,
        next_id: Mutex<u64>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeStore {
        fn with(tasks: Vec<Task>, failing: &[u64]) -> Self {
            Self {
                tasks: Mutex::new(tasks),
                failing: failing.iter().copied().collect(),
                next_id: Mutex::new(100),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn fail() -> ApiError {
            ApiError::Status {
                status: 503,
                body: "unavailable".to_string(),
            }
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl TaskStore for FakeStore {
        async fn list(&self) -> Result<Vec<Task>, ApiError> {
            self.record("list".to_string());
            Ok(self.tasks.lock().unwrap().clone())
        }

        async fn create(&self, title: &str, completed: bool) -> Result<Task, ApiError> {
            self.record(format!("create {}", title));
            let mut next_id = self.next_id.lock().unwrap();
            let task = Task::new(*next_id, title, completed, USER);
            *next_id += 1;
            self.tasks.lock().unwrap().push(task.clone());
            Ok(task)
        }

        async fn update(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, ApiError> {
            self.record(format!("update {}", id));
            if self.failing.contains(&id.0) {
                return Err(Self::fail());
            }
            let mut tasks = self.tasks.lock().unwrap();
            let task = tasks.iter_mut().find(|t| t.id == id).ok_or_else(Self::fail)?;
            if let Some(title) = &patch.title {
                task.title = title.clone();
            }
            if let Some(completed) = patch.completed {
                task.completed = completed;
            }
            Ok(task.clone())
        }

        async fn delete(&self, id: TaskId) -> Result<(), ApiError> {
            self.record(format!("delete {}", id));
            if self.failing.contains(&id.0) {
                return Err(Self::fail());
            }
            self.tasks.lock().unwrap().retain(|t| t.id != id);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_dispatch_load() {
        let store = FakeStore::with(vec![Task::new(1, "a", false, USER)], &[]);

        let outcome = dispatch(&store, Request::Load).await;
        match outcome {
            Outcome::Loaded(Ok(tasks)) => assert_eq!(tasks, vec![Task::new(1, "a", false, USER)]),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dispatch_delete_many_waits_for_every_call() {
        let store = FakeStore::with(
            vec![
                Task::new(1, "a", true, USER),
                Task::new(2, "b", true, USER),
                Task::new(3, "c", true, USER),
            ],
            &[1],
        );

        let outcome = dispatch(
            &store,
            Request::DeleteMany {
                ids: vec![TaskId(1), TaskId(2), TaskId(3)],
            },
        )
        .await;

        let Outcome::DeletedMany(results) = outcome else {
            panic!("expected DeletedMany");
        };
        let summary: Vec<(u64, bool)> = results.iter().map(|(id, r)| (id.0, r.is_ok())).collect();
        assert_eq!(summary, vec![(1, false), (2, true), (3, true)]);
        assert_eq!(store.calls.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_dispatch_update_many_sends_same_completion() {
        let store = FakeStore::with(vec![Task::new(1, "a", false, USER), Task::new(2, "b", false, USER)], &[]);

        let outcome = dispatch(
            &store,
            Request::UpdateMany {
                ids: vec![TaskId(1), TaskId(2)],
                completed: true,
            },
        )
        .await;

        let Outcome::UpdatedMany(results) = outcome else {
            panic!("expected UpdatedMany");
        };
        assert!(results.iter().all(|(_, r)| r.as_ref().is_ok_and(|t| t.completed)));
    }

    #[tokio::test]
    async fn test_create_scenario_end_to_end() {
        let store = FakeStore::with(vec![Task::new(1, "a", false, USER)], &[]);
        let mut app = AppState::new(std::time::Duration::from_secs(3));

        let load = app.load();
        app.apply(dispatch(&store, load).await);

        app.draft = "  b  ".to_string();
        let request = app.submit_new_task().unwrap();
        app.apply(dispatch(&store, request).await);

        assert_eq!(
            app.tasks,
            vec![Task::new(1, "a", false, USER), Task::new(100, "b", false, USER)]
        );
        assert!(app.pending.is_none());
        assert_eq!(*store.calls.lock().unwrap(), vec!["list".to_string(), "create b".to_string()]);
    }

    #[tokio::test]
    async fn test_clear_completed_end_to_end_with_failure() {
        let store = FakeStore::with(
            vec![
                Task::new(1, "a", true, USER),
                Task::new(2, "b", false, USER),
                Task::new(3, "c", true, USER),
            ],
            &[3],
        );
        let mut app = AppState::new(std::time::Duration::from_secs(3));
        let load = app.load();
        app.apply(dispatch(&store, load).await);

        let request = app.clear_completed().unwrap();
        app.apply(dispatch(&store, request).await);

        let ids: Vec<u64> = app.tasks.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![2, 3]);
        assert!(app.tasks.iter().all(|t| !t.loading));
        assert!(app.notification.is_some());
    }
}
