// Views module - screen-level rendering
//
// One screen: title bar, bucket tabs, the page table (with the logs panel
// beside or below it when toggled), the pagination bar and the status bar.

mod board;

use super::app::App;
use super::components::{self, pagination};
use super::layout::Breakpoint;
use chrono::Utc;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.bg));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(3), // tabs
            Constraint::Min(5),    // content
            Constraint::Length(1), // pagination
            Constraint::Length(2), // status
        ])
        .split(f.area());

    let model = app.board().model(Utc::now());
    let bp = Breakpoint::from_width(f.area().width);

    components::render_title(f, chunks[0], app);
    board::render_tabs(f, chunks[1], &model, &app.theme);

    let content = chunks[2];
    if app.show_logs {
        let split = if bp.at_least(Breakpoint::Wide) {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
                .split(content)
        } else {
            Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(5), Constraint::Length(8)])
                .split(content)
        };
        board::render_table(f, split[0], &model, &app.theme);
        components::render_logs_panel(f, split[1], app);
    } else {
        board::render_table(f, content, &model, &app.theme);
    }

    let items = pagination::pagination_items(
        model.page,
        model.total_pages,
        bp.pagination_siblings(),
    );
    pagination::render(f, chunks[3], &items, &app.theme);

    components::render_status(f, chunks[4], app);
}
