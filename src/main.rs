// testmarket - marketplace review console
//
// A terminal console over the records of an app-testing marketplace:
// submissions under review, tester assignments, user accounts and
// notifications, each partitioned into status tabs and paginated.
//
// Architecture:
// - Source (file, http or demo): produces snapshot documents
// - Poller: refetches on an interval or on demand, forwards changed boards
// - Boards: validated records partitioned into buckets and paged
// - TUI (ratatui): tabs, tables and a pagination bar over the boards
// - Channels: mpsc for source events and refresh commands, oneshot for shutdown

mod board;
mod cli;
mod config;
mod listing;
mod logging;
mod records;
mod source;
mod startup;
mod tui;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use source::{Poller, Source, SourceEvent};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Subcommands (print, config) run and exit without the console
    if cli::handle_cli(&cli).await? {
        return Ok(());
    }

    Config::ensure_config_exists();

    let mut config = Config::from_env()?;
    cli.source.apply(&mut config.source);

    let log_buffer = LogBuffer::new();

    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("testmarket={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // The guard must outlive the program so buffered lines get flushed
    let _file_guard = init_tracing(&config, filter, &log_buffer);

    let source = Source::from_config(&config.source)
        .with_context(|| format!("Invalid {} source", config.source.kind.as_str()))?;
    let source_label = source.describe();

    startup::print_startup(&config, &source_label);
    if config.enable_tui {
        startup::log_startup(&config, &source_label);
    }

    let (event_tx, event_rx) = mpsc::channel(16);
    let (command_tx, command_rx) = mpsc::channel(4);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let poller = Poller::new(
        source,
        Duration::from_secs(config.source.poll_interval_secs),
    );
    let poller_handle = tokio::spawn(poller.run(event_tx, command_rx, shutdown_rx));

    let result = if config.enable_tui {
        tui::run_tui(event_rx, command_tx, source_label, log_buffer, &config).await
    } else {
        run_headless(event_rx).await
    };

    let _ = shutdown_tx.send(());
    if let Err(e) = poller_handle.await {
        tracing::error!("Poller task failed: {}", e);
    }

    result
}

/// Install the global subscriber
///
/// TUI mode captures events into the log buffer so they don't garble the
/// screen; headless mode writes them to stdout. Either way a JSON file
/// layer is added when file logging is enabled.
fn init_tracing(
    config: &Config,
    filter: EnvFilter,
    log_buffer: &LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tui_layer = config
        .enable_tui
        .then(|| TuiLogLayer::new(log_buffer.clone()));
    let stdout_layer = (!config.enable_tui).then(tracing_subscriber::fmt::layer);

    let (file_layer, guard) = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let dir = &config.logging.file_dir;
                let prefix = &config.logging.file_prefix;
                let appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(dir, prefix),
                    LogRotation::Daily => tracing_appender::rolling::daily(dir, prefix),
                    LogRotation::Never => tracing_appender::rolling::never(dir, prefix),
                };
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}

/// Headless mode: log every delivery until Ctrl+C
async fn run_headless(mut event_rx: mpsc::Receiver<SourceEvent>) -> Result<()> {
    tracing::info!("Running headless, press Ctrl+C to stop");

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl+C")?;
                tracing::info!("Shutting down");
                return Ok(());
            }

            event = event_rx.recv() => match event {
                Some(SourceEvent::Delivered { snapshot, changed }) => {
                    for kind in changed {
                        tracing::info!(
                            board = kind.as_str(),
                            records = snapshot.len(kind),
                            "Board updated"
                        );
                    }
                    if !snapshot.rejected.is_empty() {
                        tracing::warn!(
                            rejected = snapshot.rejected.len(),
                            "Records rejected by validation"
                        );
                    }
                }
                Some(SourceEvent::Failed { message }) => {
                    tracing::error!("Fetch failed: {}", message);
                }
                None => return Ok(()),
            },
        }
    }
}
