use crate::app::AppState;
use crate::ui::styles::{border_style, error_style, hint_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the current error, if any
pub fn render_notification(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(notification) = &app.notification else {
        return;
    };

    let line = Line::from(vec![
        Span::styled(format!("✕ {}", notification.message()), error_style()),
        Span::styled("   (Esc to dismiss)", hint_style()),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style()),
    );

    f.render_widget(paragraph, area);
}
