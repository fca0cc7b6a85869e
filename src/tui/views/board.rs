// Board view - bucket tabs and the current page as a table

use crate::board::BoardModel;
use crate::tui::layout::Breakpoint;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs},
    Frame,
};

/// Render the bucket tab bar
pub fn render_tabs(f: &mut Frame, area: Rect, model: &BoardModel, theme: &Theme) {
    let titles: Vec<Line> = model
        .tabs
        .iter()
        .map(|tab| Line::from(format!(" {} ({}) ", tab.label, tab.count)))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        )
        .select(model.active_tab)
        .style(Style::default().fg(theme.fg))
        .highlight_style(theme.highlight())
        .divider("│");

    f.render_widget(tabs, area);
}

/// Render the current page of the active bucket
pub fn render_table(f: &mut Frame, area: Rect, model: &BoardModel, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(table_title(model));

    if model.rows.is_empty() {
        f.render_widget(
            Paragraph::new(empty_message(model))
                .style(Style::default().fg(theme.muted))
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }

    // Compact terminals keep only the first column
    let columns = if Breakpoint::from_width(area.width).at_least(Breakpoint::Normal) {
        model.headers.len()
    } else {
        1
    };

    let header = Row::new(
        model
            .headers
            .iter()
            .take(columns)
            .map(|h| Cell::from(*h)),
    )
    .style(
        Style::default()
            .fg(theme.header)
            .add_modifier(Modifier::BOLD),
    );

    let rows = model.rows.iter().map(|cells| {
        Row::new(cells.iter().take(columns).map(|c| Cell::from(c.as_str())))
            .style(Style::default().fg(theme.fg))
    });

    let widths: Vec<Constraint> = if columns == 1 {
        vec![Constraint::Min(0)]
    } else {
        model
            .widths
            .iter()
            .map(|&w| Constraint::Length(w))
            .collect()
    };

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .block(block);

    f.render_widget(table, area);
}

fn table_title(model: &BoardModel) -> String {
    let bucket = model
        .tabs
        .get(model.active_tab)
        .map(|t| t.label)
        .unwrap_or_default();
    match model.item_range {
        Some((start, end)) => format!(
            " {} · {} · {}-{} of {} ",
            model.title, bucket, start, end, model.bucket_len
        ),
        None => format!(" {} · {} ", model.title, bucket),
    }
}

fn empty_message(model: &BoardModel) -> String {
    let bucket = model
        .tabs
        .get(model.active_tab)
        .map(|t| t.label.to_lowercase())
        .unwrap_or_default();
    if model.query.is_empty() {
        format!("\nNo {} records", bucket)
    } else {
        format!("\nNo {} records matching {:?}", bucket, model.query)
    }
}
