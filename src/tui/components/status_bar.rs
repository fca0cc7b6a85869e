// Status bar component
//
// Bottom line: the search prompt while typing, otherwise the source status
// and either a transient message or the key hints.

use crate::tui::app::{App, InputMode};
use crate::tui::layout::Breakpoint;
use crate::util::format_age;
use chrono::Utc;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const HINTS_FULL: &str =
    "1-4 board │ ←/→ tab │ n/p page │ Home/End │ / search │ r refresh │ l logs │ q quit";
const HINTS_COMPACT: &str = "←/→ n/p / r l q";

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(theme.border));

    if app.mode == InputMode::Search {
        let prompt = Line::from(vec![
            Span::styled(" / ", Style::default().fg(theme.search)),
            Span::styled(format!("{}▏", app.search_input), Style::default().fg(theme.fg)),
            Span::styled(
                "   Enter keep · Esc clear",
                Style::default().fg(theme.muted),
            ),
        ]);
        f.render_widget(Paragraph::new(prompt).block(block), area);
        return;
    }

    let bp = Breakpoint::from_width(area.width);
    let source = &app.source;

    let freshness = match (&source.last_error, source.last_delivery) {
        (Some(_), _) => "fetch failed".to_string(),
        (None, Some(at)) => format!("updated {}", format_age(at, Utc::now())),
        (None, None) => "waiting for data".to_string(),
    };
    let mut left = format!(" {} │ {} │ {}", app.uptime(), source.label, freshness);
    if source.rejected > 0 {
        left.push_str(&format!(" │ {} rejected", source.rejected));
    }

    let right = match &app.status {
        Some(msg) => Span::styled(
            format!(" │ {}", msg.text),
            Style::default().fg(if msg.is_error {
                theme.log_error
            } else {
                theme.status_bar
            }),
        ),
        None if bp.at_least(Breakpoint::Wide) => Span::styled(
            format!(" │ {}", HINTS_FULL),
            Style::default().fg(theme.muted),
        ),
        None => Span::styled(
            format!(" │ {}", HINTS_COMPACT),
            Style::default().fg(theme.muted),
        ),
    };

    let line = Line::from(vec![
        Span::styled(left, Style::default().fg(theme.status_bar)),
        right,
    ]);
    f.render_widget(Paragraph::new(line).block(block), area);
}
