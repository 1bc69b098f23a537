pub mod footer;
pub mod header;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod notification;
pub mod styles;

use crate::app::AppState;
use footer::render_footer;
use header::render_header;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use notification::render_notification;
use ratatui::Frame;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size, !app.tasks.is_empty(), app.notification.is_some());

    render_keybindings(f, app, layout.keybindings_area);
    render_header(f, app, layout.header_area);
    render_list_pane(f, app, layout.list_area);

    // Footer only when there are tasks to count
    if let Some(footer_area) = layout.footer_area {
        render_footer(f, app, footer_area);
    }

    if let Some(notification_area) = layout.notification_area {
        render_notification(f, app, notification_area);
    }
}
