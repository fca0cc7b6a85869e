//! Pagination control
//!
//! `pagination_items` lays out a page-button bar: previous, the first and
//! last page, the current page with `siblings` neighbours on each side,
//! ellipses for the gaps, next. A gap of exactly one page shows that page
//! instead of an ellipsis, so the bar never hides a single button.

use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// `target` is `None` on the first page
    Prev { target: Option<usize> },
    Page { number: usize, current: bool },
    Ellipsis,
    /// `target` is `None` on the last page
    Next { target: Option<usize> },
}

pub fn pagination_items(current: usize, total: usize, siblings: usize) -> Vec<PageItem> {
    let total = total.max(1);
    let current = current.clamp(1, total);
    let page = |number| PageItem::Page {
        number,
        current: number == current,
    };

    let start = current.saturating_sub(siblings).max(1);
    let end = (current + siblings).min(total);

    let mut items = vec![PageItem::Prev {
        target: (current > 1).then(|| current - 1),
    }];

    if start > 1 {
        items.push(page(1));
        match start {
            2 => {}
            3 => items.push(page(2)),
            _ => items.push(PageItem::Ellipsis),
        }
    }

    items.extend((start..=end).map(page));

    if end < total {
        match total - end {
            1 => {}
            2 => items.push(page(total - 1)),
            _ => items.push(PageItem::Ellipsis),
        }
        items.push(page(total));
    }

    items.push(PageItem::Next {
        target: (current < total).then(|| current + 1),
    });
    items
}

/// Plain-text form, e.g. `< Prev  1 ... 4 [5] 6 ... 10  Next >`
pub fn pagination_text(items: &[PageItem]) -> String {
    items
        .iter()
        .map(|item| match item {
            PageItem::Prev { target: Some(_) } => "< Prev ".to_string(),
            PageItem::Prev { target: None } => "  Prev ".to_string(),
            PageItem::Page {
                number,
                current: true,
            } => format!("[{}]", number),
            PageItem::Page { number, .. } => number.to_string(),
            PageItem::Ellipsis => "...".to_string(),
            PageItem::Next { target: Some(_) } => " Next >".to_string(),
            PageItem::Next { target: None } => " Next  ".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Render the pagination bar centered in `area`
pub fn render(f: &mut Frame, area: Rect, items: &[PageItem], theme: &Theme) {
    let enabled = Style::default().fg(theme.fg);
    let disabled = Style::default().fg(theme.page_disabled);

    let mut spans = Vec::with_capacity(items.len() * 2);
    for item in items {
        let span = match item {
            PageItem::Prev { target } => Span::styled(
                "‹ Prev",
                if target.is_some() { enabled } else { disabled },
            ),
            PageItem::Next { target } => Span::styled(
                "Next ›",
                if target.is_some() { enabled } else { disabled },
            ),
            PageItem::Page {
                number,
                current: true,
            } => Span::styled(
                format!("[{}]", number),
                theme.highlight().add_modifier(Modifier::REVERSED),
            ),
            PageItem::Page { number, .. } => Span::styled(number.to_string(), enabled),
            PageItem::Ellipsis => Span::styled("…", Style::default().fg(theme.muted)),
        };
        spans.push(span);
        spans.push(Span::raw("  "));
    }
    spans.pop();

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}
