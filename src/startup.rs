// Startup module - banner and configuration summary
//
// Printed before the TUI takes over the screen (or before headless mode
// starts logging), and mirrored into the log buffer so the logs panel
// starts with the same information.

use crate::board::{BoardKind, Boards};
use crate::config::{Config, VERSION};
use chrono::Utc;

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// One line of the board summary
struct BoardSummary {
    title: &'static str,
    page_size: usize,
    buckets: usize,
}

fn board_summaries(config: &Config) -> Vec<BoardSummary> {
    let boards = Boards::new(&config.listing);
    let now = Utc::now();
    BoardKind::all()
        .iter()
        .map(|&kind| BoardSummary {
            title: kind.title(),
            page_size: config.listing.page_size(kind).get(),
            buckets: boards.get(kind).model(now).tabs.len(),
        })
        .collect()
}

fn poll_description(config: &Config) -> String {
    match config.source.poll_interval_secs {
        0 => "refresh only".to_string(),
        secs => format!("every {}s", secs),
    }
}

/// Print the startup banner and configuration summary
pub fn print_startup(config: &Config, source_label: &str) {
    use colors::*;

    println!();
    println!("  {BOLD}{CYAN}testmarket{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Marketplace review console{RESET}");
    println!();

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!();

    println!("  {DIM}Boards{RESET}");
    for board in board_summaries(config) {
        println!(
            "    {GREEN}✓{RESET} {:<14} {DIM}{} buckets, {} per page{RESET}",
            board.title, board.buckets, board.page_size
        );
    }
    println!(
        "    {DIM}tab policy: {}{RESET}",
        config.listing.tab_policy.as_str()
    );
    println!();

    println!(
        "  {MAGENTA}▸{RESET} Source {BOLD}{}{RESET} {DIM}({}){RESET}",
        source_label,
        poll_description(config)
    );
    if source_label == "demo" {
        println!("  {YELLOW}▸{RESET} {YELLOW}Demo mode active{RESET} {DIM}(generated records){RESET}");
    }
    println!();
}

/// Print the same summary into the log buffer
pub fn log_startup(config: &Config, source_label: &str) {
    tracing::info!("testmarket v{}", VERSION);
    for board in board_summaries(config) {
        tracing::info!(
            "  ✓ {} - {} buckets, {} per page",
            board.title,
            board.buckets,
            board.page_size
        );
    }
    tracing::info!(
        "▸ Source {} ({})",
        source_label,
        poll_description(config)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_summaries_follow_config() {
        let mut config = Config::default();
        config.listing.page_sizes.users = 9;

        let summaries = board_summaries(&config);
        assert_eq!(summaries.len(), BoardKind::all().len());

        let users = summaries.iter().find(|s| s.title == "Users").unwrap();
        assert_eq!(users.page_size, 9);
        assert_eq!(users.buckets, 3);
    }

    #[test]
    fn test_poll_description() {
        let mut config = Config::default();
        assert_eq!(poll_description(&config), "every 30s");
        config.source.poll_interval_secs = 0;
        assert_eq!(poll_description(&config), "refresh only");
    }
}
