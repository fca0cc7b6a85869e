// Components module - reusable UI building blocks
//
// Shell components are rendered on every frame:
// - Title bar: app name, boards with record counts, refresh indicator
// - Status bar: source status, messages, key hints, search prompt
// - Pagination: page-button bar under the table
// - Logs panel: tail of the log buffer

pub mod logs_panel;
pub mod pagination;
pub mod status_bar;
pub mod title_bar;

use crate::tui::app::App;
use ratatui::{layout::Rect, Frame};

/// Render the title bar (convenience wrapper)
pub fn render_title(f: &mut Frame, area: Rect, app: &App) {
    title_bar::render(f, area, app);
}

/// Render the status bar (convenience wrapper)
pub fn render_status(f: &mut Frame, area: Rect, app: &App) {
    status_bar::render(f, area, app);
}

/// Render the logs panel with as many entries as fit
pub fn render_logs_panel(f: &mut Frame, area: Rect, app: &App) {
    let entries = app
        .log_buffer
        .recent(logs_panel::visible_rows(area.height));
    logs_panel::render(
        f,
        area,
        &entries,
        app.log_buffer.problem_count(),
        &app.theme,
    );
}
