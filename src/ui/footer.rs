use crate::app::AppState;
use crate::domain::Filter;
use crate::ui::styles::{active_style, border_style, default_style, hint_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// "3 items left", "1 item left"
fn items_left(count: usize) -> String {
    if count == 1 {
        "1 item left".to_string()
    } else {
        format!("{} items left", count)
    }
}

/// Render the counter, filter tabs and clear-completed hint
pub fn render_footer(f: &mut Frame, app: &AppState, area: Rect) {
    let paragraph = Paragraph::new(footer_line(app)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style()),
    );

    f.render_widget(paragraph, area);
}

fn footer_line(app: &AppState) -> Line<'static> {
    let mut spans = vec![Span::styled(items_left(app.active_count()), default_style())];
    spans.push(Span::raw("   "));

    for (i, filter) in Filter::all().iter().enumerate() {
        let style = if *filter == app.filter { active_style() } else { hint_style() };
        spans.push(Span::styled(format!("{} {}", i + 1, filter.label()), style));
        spans.push(Span::raw("  "));
    }

    spans.push(Span::raw(" "));
    let clear_style = if app.has_completed() { default_style() } else { hint_style() };
    spans.push(Span::styled("c Clear completed", clear_style));

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Outcome;
    use crate::domain::Task;
    use std::time::Duration;

    #[test]
    fn test_items_left() {
        assert_eq!(items_left(0), "0 items left");
        assert_eq!(items_left(1), "1 item left");
        assert_eq!(items_left(4), "4 items left");
    }

    #[test]
    fn test_clear_completed_dimmed_without_completed_tasks() {
        let mut app = AppState::new(Duration::from_secs(3));
        app.apply(Outcome::Loaded(Ok(vec![Task::new(1, "a", false, 1)])));

        let line = footer_line(&app);
        let last = line.spans.last().unwrap();
        assert_eq!(last.content, "c Clear completed");
        assert_eq!(last.style, hint_style());
    }
}
