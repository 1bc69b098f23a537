use crate::app::AppState;
use crate::domain::{Focus, Row};
use crate::ui::styles::{
    border_style, default_style, done_style, edit_style, focused_border_style, hint_style, loading_style,
    selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

const SPINNER: &str = "⟳";

/// Render the task list
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let rows = app.visible_rows();
    let editing = app.editor.as_ref();

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let draft = match (row, editing) {
                (Row::Confirmed(task), Some(editor)) if editor.id == task.id => Some(editor.draft.as_str()),
                _ => None,
            };
            ListItem::new(create_task_line(*row, draft))
        })
        .collect();

    let focused = app.focus == Focus::List;
    let title = format!(" {} ({}) ", app.filter.label(), rows.len());

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(if focused { focused_border_style() } else { border_style() })
                .title(Span::styled(title, title_style())),
        )
        .highlight_style(if focused { selected_style() } else { default_style() });

    let mut state = ListState::default().with_selected((!rows.is_empty()).then_some(app.selected_index));
    f.render_stateful_widget(list, area, &mut state);
}

/// Create a single line for a row
/// Format: [x] Title ⟳
/// While editing: [ ] > draft█
fn create_task_line(row: Row<'_>, draft: Option<&str>) -> Line<'static> {
    let mut spans = Vec::new();

    let checkbox = if row.completed() { "[x] " } else { "[ ] " };
    spans.push(Span::raw(checkbox.to_string()));

    match draft {
        Some(draft) => {
            spans.push(Span::styled(format!("> {}", draft), edit_style()));
            spans.push(Span::styled("█".to_string(), edit_style()));
            if draft.trim().is_empty() {
                spans.push(Span::styled("  (empty todo will be deleted)".to_string(), hint_style()));
            }
        }
        None => {
            let style = match row {
                Row::Pending(_) => hint_style(),
                Row::Confirmed(task) if task.completed => done_style(),
                Row::Confirmed(_) => default_style(),
            };
            spans.push(Span::styled(row.title().to_string(), style));
        }
    }

    if row.loading() {
        spans.push(Span::styled(format!(" {}", SPINNER), loading_style()));
    }

    Line::from(spans)
}
