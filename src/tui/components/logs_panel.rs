//! Logs panel component
//!
//! Shows the tail of the log buffer, color-coded by level. Always follows
//! the newest entry; the panel is toggled with 'l'.

use crate::logging::{LogEntry, LogLevel};
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, entries: &[LogEntry], problems: usize, theme: &Theme) {
    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            ListItem::new(format_log_entry(entry)).style(log_level_style(entry.level, theme))
        })
        .collect();

    let title = if problems > 0 {
        format!(" Logs ({} warn/error) ", problems)
    } else {
        " Logs ".to_string()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(title),
    );

    f.render_widget(list, area);
}

/// Entries that fit in a panel of `height` rows (borders excluded)
pub fn visible_rows(height: u16) -> usize {
    height.saturating_sub(2) as usize
}

fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.display_line()
    )
}

fn log_level_style(level: LogLevel, theme: &Theme) -> Style {
    let color = match level {
        LogLevel::Error => theme.log_error,
        LogLevel::Warn => theme.log_warn,
        LogLevel::Info => theme.log_info,
        LogLevel::Debug => theme.log_debug,
        LogLevel::Trace => theme.log_trace,
    };
    Style::default().fg(color)
}
