use crate::app::AppState;
use crate::domain::Focus;
use crate::ui::styles::{active_style, border_style, default_style, focused_border_style, hint_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const PLACEHOLDER: &str = "What needs to be done?";

/// Render the toggle-all arrow and the new task input
pub fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let focused = app.focus == Focus::NewTask;
    let paragraph = Paragraph::new(header_line(app, focused)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(if focused { focused_border_style() } else { border_style() })
            .title(Span::styled(" todos ", title_style())),
    );

    f.render_widget(paragraph, area);
}

fn header_line(app: &AppState, focused: bool) -> Line<'static> {
    let mut spans = Vec::new();

    // Toggle-all is only offered when there is something to toggle
    if app.tasks.is_empty() {
        spans.push(Span::raw("  "));
    } else {
        let style = if app.all_completed() { active_style() } else { hint_style() };
        spans.push(Span::styled("❯ ", style));
    }

    if app.is_creating() {
        // Input is disabled until the create settles
        spans.push(Span::styled(app.draft.clone(), hint_style()));
    } else {
        if app.draft.is_empty() {
            spans.push(Span::styled(PLACEHOLDER, hint_style()));
        } else {
            spans.push(Span::styled(app.draft.clone(), default_style()));
        }
        if focused {
            spans.push(Span::styled("█", default_style()));
        }
    }

    Line::from(spans)
}
