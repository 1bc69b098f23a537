use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub header_area: Rect,
    pub list_area: Rect,
    pub footer_area: Option<Rect>,
    pub notification_area: Option<Rect>,
}

/// Create the main layout, top to bottom:
/// - Keybindings bar (1 row)
/// - Header: toggle-all + new task input (3 rows)
/// - Task list (rest)
/// - Footer: counter, filters, clear completed (3 rows, only when there are tasks)
/// - Error notification (3 rows, only while one is shown)
pub fn create_layout(area: Rect, show_footer: bool, show_notification: bool) -> MainLayout {
    let footer_height = if show_footer { 3 } else { 0 };
    let notification_height = if show_notification { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                   // Keybindings bar
            Constraint::Length(3),                   // Header
            Constraint::Min(0),                      // Task list
            Constraint::Length(footer_height),       // Footer
            Constraint::Length(notification_height), // Notification
        ])
        .split(area);

    MainLayout {
        keybindings_area: chunks[0],
        header_area: chunks[1],
        list_area: chunks[2],
        footer_area: show_footer.then_some(chunks[3]),
        notification_area: show_notification.then_some(chunks[4]),
    }
}
