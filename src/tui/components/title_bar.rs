// Title bar component
//
// App name on the left, one entry per board with its record count, and the
// refresh indicator on the right.

use crate::board::BoardKind;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut spans = vec![Span::styled(
        " testmarket ",
        Style::default()
            .fg(theme.title)
            .add_modifier(Modifier::BOLD),
    )];

    for (i, &kind) in BoardKind::all().iter().enumerate() {
        let board = app.boards.get(kind);
        let text = format!(" {} {} ({}) ", i + 1, kind.title(), board.record_count());
        let style = if kind == app.active {
            theme.highlight().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(theme.fg)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(text, style));
    }

    let indicator = if app.source.refreshing {
        " ⟳ fetching "
    } else {
        " r refresh "
    };

    let title = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title_top(
                Line::from(Span::styled(indicator, Style::default().fg(theme.muted)))
                    .right_aligned(),
            ),
    );

    f.render_widget(title, area);
}
