// Application state for the TUI
//
// App owns the four boards and everything the views need to draw them:
// which board is showing, the search prompt, the last source status and the
// log buffer. Source events arrive through `apply_source_event`; refetch
// requests leave through the poller's command channel.

use crate::board::{BoardKind, BoardView, Boards};
use crate::config::Config;
use crate::logging::LogBuffer;
use crate::source::{PollCommand, SourceEvent};
use crate::tui::theme::{Theme, ThemeKind};
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// How long a status message stays in the status bar
const STATUS_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the search prompt; the query applies live
    Search,
}

/// Transient message shown in the status bar
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    shown_at: Instant,
}

/// Outcome of the most recent fetch
#[derive(Debug, Clone, Default)]
pub struct SourceStatus {
    pub label: String,
    pub last_delivery: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub rejected: usize,
    pub refreshing: bool,
}

pub struct App {
    pub boards: Boards,
    pub active: BoardKind,
    pub mode: InputMode,
    /// Prompt text while in search mode (the board keeps the trimmed query)
    pub search_input: String,
    pub show_logs: bool,
    pub theme_kind: ThemeKind,
    pub theme: Theme,
    pub log_buffer: LogBuffer,
    pub source: SourceStatus,
    pub status: Option<StatusMessage>,
    pub should_quit: bool,
    pub start_time: Instant,
    commands: Option<mpsc::Sender<PollCommand>>,
}

impl App {
    pub fn new(
        config: &Config,
        log_buffer: LogBuffer,
        source_label: String,
        commands: Option<mpsc::Sender<PollCommand>>,
    ) -> Self {
        let theme_kind = ThemeKind::from_name(&config.theme);
        Self {
            boards: Boards::new(&config.listing),
            active: BoardKind::default(),
            mode: InputMode::Normal,
            search_input: String::new(),
            show_logs: false,
            theme_kind,
            theme: theme_kind.theme(),
            log_buffer,
            source: SourceStatus {
                label: source_label,
                refreshing: true,
                ..Default::default()
            },
            status: None,
            should_quit: false,
            start_time: Instant::now(),
            commands,
        }
    }

    pub fn board(&self) -> &dyn BoardView {
        self.boards.get(self.active)
    }

    pub fn board_mut(&mut self) -> &mut dyn BoardView {
        self.boards.get_mut(self.active)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Source
    // ─────────────────────────────────────────────────────────────────────

    pub fn apply_source_event(&mut self, event: SourceEvent) {
        self.source.refreshing = false;
        match event {
            SourceEvent::Delivered { snapshot, changed } => {
                self.source.rejected = snapshot.rejected.len();
                self.source.last_delivery = Some(Utc::now());
                self.source.last_error = None;
                if self.source.rejected > 0 {
                    self.set_status(
                        format!("{} record(s) rejected, see logs", self.source.rejected),
                        true,
                    );
                }
                self.boards.apply(snapshot, &changed);
            }
            SourceEvent::Failed { message } => {
                self.set_status(format!("Fetch failed: {}", message), true);
                self.source.last_error = Some(message);
            }
        }
    }

    /// Ask the poller for an immediate refetch
    pub fn request_refresh(&mut self) {
        let Some(commands) = &self.commands else {
            return;
        };
        match commands.try_send(PollCommand::Refresh) {
            Ok(()) => {
                self.source.refreshing = true;
                self.set_status("Refreshing…", false);
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                // A refresh is already queued
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.set_status("Source poller stopped", true);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Boards
    // ─────────────────────────────────────────────────────────────────────

    pub fn select_board(&mut self, kind: BoardKind) {
        if self.active != kind {
            self.active = kind;
            tracing::debug!(board = kind.as_str(), "Board selected");
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────

    pub fn start_search(&mut self) {
        self.search_input = self.board().query().to_string();
        self.mode = InputMode::Search;
    }

    pub fn search_push(&mut self, c: char) {
        self.search_input.push(c);
        let query = self.search_input.clone();
        self.board_mut().set_query(&query);
    }

    pub fn search_pop(&mut self) {
        self.search_input.pop();
        let query = self.search_input.clone();
        self.board_mut().set_query(&query);
    }

    /// Leave the prompt, keeping the query
    pub fn commit_search(&mut self) {
        self.mode = InputMode::Normal;
    }

    /// Leave the prompt and drop the query
    pub fn clear_search(&mut self) {
        self.mode = InputMode::Normal;
        self.search_input.clear();
        if self.board_mut().set_query("") {
            self.set_status("Search cleared", false);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Chrome
    // ─────────────────────────────────────────────────────────────────────

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }

    pub fn cycle_theme(&mut self) {
        self.theme_kind = self.theme_kind.next();
        self.theme = self.theme_kind.theme();
        self.set_status(format!("Theme: {}", self.theme_kind.name()), false);
    }

    pub fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error,
            shown_at: Instant::now(),
        });
    }

    /// Called on every tick
    pub fn tick(&mut self) {
        if self
            .status
            .as_ref()
            .is_some_and(|s| s.shown_at.elapsed() >= STATUS_TTL)
        {
            self.status = None;
        }
    }

    /// Format uptime as HH:MM:SS
    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
