use crate::app::AppState;
use crate::domain::Focus;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Render the keybindings hint bar for the current focus
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    let hints = if app.editor.is_some() {
        " Enter save   Esc cancel   Tab save & leave   (empty title deletes)"
    } else {
        match app.focus {
            Focus::NewTask => " Enter add   Tab list   Esc dismiss error   Ctrl+C quit",
            Focus::List => {
                " ↑/↓ select   Space toggle   Enter/e rename   d delete   a toggle all   c clear done   f/1-3 filter   x dismiss   Tab input   q quit"
            }
        }
    };

    let paragraph = Paragraph::new(Line::raw(hints)).style(hint_style());
    f.render_widget(paragraph, area);
}
