// Theme system for the TUI
//
// Three built-in palettes selectable from config (`theme = "dark"`) and
// cycled at runtime with 't'.

use ratatui::style::{Color, Modifier, Style};

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
    /// Plain ANSI colors, terminal background
    Terminal,
}

impl ThemeKind {
    pub fn all() -> &'static [ThemeKind] {
        &[ThemeKind::Dark, ThemeKind::Light, ThemeKind::Terminal]
    }

    /// Parse a config value; unknown names fall back to dark
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "light" => ThemeKind::Light,
            "terminal" | "auto" => ThemeKind::Terminal,
            _ => ThemeKind::Dark,
        }
    }

    /// Get the next theme in the cycle
    pub fn next(self) -> Self {
        let themes = Self::all();
        let current = themes.iter().position(|&t| t == self).unwrap_or(0);
        themes[(current + 1) % themes.len()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "dark",
            ThemeKind::Light => "light",
            ThemeKind::Terminal => "terminal",
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
            ThemeKind::Terminal => Theme::terminal(),
        }
    }
}

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub border: Color,
    pub border_focused: Color,
    pub muted: Color,

    // Title and status
    pub title: Color,
    pub status_bar: Color,

    // Tables
    pub header: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,

    // Pagination
    pub page_current: Color,
    pub page_disabled: Color,

    // Search prompt
    pub search: Color,

    // Log levels
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
    pub log_trace: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(22, 24, 30),
            fg: Color::Rgb(220, 223, 228),
            border: Color::Rgb(92, 99, 112),
            border_focused: Color::Cyan,
            muted: Color::Rgb(120, 126, 138),

            title: Color::Cyan,
            status_bar: Color::Green,

            header: Color::Rgb(229, 192, 123),
            selected_bg: Color::Rgb(44, 49, 60),
            selected_fg: Color::Yellow,

            page_current: Color::Cyan,
            page_disabled: Color::Rgb(70, 75, 86),

            search: Color::Magenta,

            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Blue,
            log_debug: Color::Gray,
            log_trace: Color::DarkGray,
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            border: Color::DarkGray,
            border_focused: Color::Blue,
            muted: Color::Gray,

            title: Color::Blue,
            status_bar: Color::DarkGray,

            header: Color::Rgb(184, 134, 11), // Dark goldenrod
            selected_bg: Color::LightBlue,
            selected_fg: Color::Black,

            page_current: Color::Blue,
            page_disabled: Color::Gray,

            search: Color::Magenta,

            log_error: Color::Red,
            log_warn: Color::Rgb(184, 134, 11),
            log_info: Color::Blue,
            log_debug: Color::DarkGray,
            log_trace: Color::Gray,
        }
    }

    pub fn terminal() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::Reset,
            border: Color::Gray,
            border_focused: Color::Cyan,
            muted: Color::DarkGray,

            title: Color::Cyan,
            status_bar: Color::Green,

            header: Color::Yellow,
            selected_bg: Color::DarkGray,
            selected_fg: Color::Yellow,

            page_current: Color::Cyan,
            page_disabled: Color::DarkGray,

            search: Color::Magenta,

            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Blue,
            log_debug: Color::Gray,
            log_trace: Color::DarkGray,
        }
    }

    /// Style for the active tab or current page
    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.page_current)
            .add_modifier(Modifier::BOLD)
    }
}
