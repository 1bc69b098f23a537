use crate::app::{AppState, Request};
use crate::domain::{Filter, Focus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the runner should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handled {
    Nothing,
    Request(Request),
    Quit,
}

impl From<Option<Request>> for Handled {
    fn from(request: Option<Request>) -> Self {
        match request {
            Some(request) => Handled::Request(request),
            None => Handled::Nothing,
        }
    }
}

/// Handle keyboard input events
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Handled {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Handled::Quit;
    }

    if app.editor.is_some() {
        return handle_edit_mode(app, key);
    }

    match app.focus {
        Focus::NewTask => handle_new_task_mode(app, key),
        Focus::List => handle_list_mode(app, key),
    }
}

/// Typing into the new-task input
fn handle_new_task_mode(app: &mut AppState, key: KeyEvent) -> Handled {
    match key.code {
        KeyCode::Enter => app.submit_new_task().into(),
        KeyCode::Backspace => {
            app.input_backspace();
            Handled::Nothing
        }
        KeyCode::Tab | KeyCode::Down => app.toggle_focus().into(),
        KeyCode::Esc => {
            app.dismiss_notification();
            Handled::Nothing
        }
        KeyCode::Char(c) => {
            app.input_char(c);
            Handled::Nothing
        }
        _ => Handled::Nothing,
    }
}

/// Navigating and acting on the task list
fn handle_list_mode(app: &mut AppState, key: KeyEvent) -> Handled {
    match key.code {
        KeyCode::Up => {
            app.move_selection_up();
            Handled::Nothing
        }
        KeyCode::Down => {
            app.move_selection_down();
            Handled::Nothing
        }
        KeyCode::Tab => app.toggle_focus().into(),

        // Toggle completion of the selected task
        KeyCode::Char(' ') => app.toggle_selected().into(),

        // Inline rename
        KeyCode::Enter | KeyCode::Char('e') => {
            app.begin_edit_selected();
            Handled::Nothing
        }

        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected().into(),

        // Bulk actions
        KeyCode::Char('a') => app.toggle_all().into(),
        KeyCode::Char('c') => app.clear_completed().into(),

        // Filters
        KeyCode::Char('f') => {
            app.cycle_filter();
            Handled::Nothing
        }
        KeyCode::Char('1') => {
            app.set_filter(Filter::All);
            Handled::Nothing
        }
        KeyCode::Char('2') => {
            app.set_filter(Filter::Active);
            Handled::Nothing
        }
        KeyCode::Char('3') => {
            app.set_filter(Filter::Completed);
            Handled::Nothing
        }

        KeyCode::Char('x') | KeyCode::Esc => {
            app.dismiss_notification();
            Handled::Nothing
        }

        KeyCode::Char('q') => Handled::Quit,
        _ => Handled::Nothing,
    }
}

/// Editing a row title in place
fn handle_edit_mode(app: &mut AppState, key: KeyEvent) -> Handled {
    match key.code {
        KeyCode::Enter => app.commit_edit().into(),
        KeyCode::Esc => {
            app.cancel_edit();
            Handled::Nothing
        }
        // Leaving the row commits, like a blur
        KeyCode::Tab => app.toggle_focus().into(),
        KeyCode::Backspace => {
            app.edit_backspace();
            Handled::Nothing
        }
        KeyCode::Char(c) => {
            app.edit_char(c);
            Handled::Nothing
        }
        _ => Handled::Nothing,
    }
}
