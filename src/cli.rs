// CLI module - command-line argument parsing and handlers
//
// Without a subcommand the console starts (TUI or headless). Subcommands:
// - print: fetch once and print one page of a board as a text table
// - config --show|--path|--reset|--edit: configuration management

use crate::board::{BoardKind, BoardModel, Boards};
use crate::config::{Config, SourceConfig, SourceKind, VERSION};
use crate::source::Source;
use crate::tui::components::pagination::{pagination_items, pagination_text};
use crate::util::pad_to_width;
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

/// testmarket - admin console for an app-testing marketplace
#[derive(Parser)]
#[command(name = "testmarket")]
#[command(version = VERSION)]
#[command(about = "Admin console for an app-testing marketplace", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Source overrides, applied on top of env and config file
#[derive(Args, Debug, Default, Clone)]
pub struct SourceArgs {
    /// Where records come from
    #[arg(long, global = true, value_enum)]
    pub source: Option<SourceKind>,

    /// Snapshot file (implies --source file)
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Snapshot URL (implies --source http)
    #[arg(long, global = true)]
    pub url: Option<String>,
}

impl SourceArgs {
    pub fn apply(&self, config: &mut SourceConfig) {
        if let Some(file) = &self.file {
            config.file = Some(file.clone());
            config.kind = SourceKind::File;
        }
        if let Some(url) = &self.url {
            config.url = Some(url.clone());
            config.kind = SourceKind::Http;
        }
        if let Some(kind) = self.source {
            config.kind = kind;
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one page of a board
    Print {
        /// Board to print
        #[arg(long, value_enum, default_value_t = BoardKind::Submissions)]
        board: BoardKind,

        /// Bucket (status or role), e.g. in_review
        #[arg(long)]
        bucket: Option<String>,

        /// Page number (out-of-range values are clamped)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Case-insensitive search applied before bucketing
        #[arg(long)]
        query: Option<String>,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Handle CLI subcommands. Returns true if a command was handled (exit after).
pub async fn handle_cli(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Some(Commands::Print {
            board,
            bucket,
            page,
            query,
        }) => {
            handle_print(&cli.source, *board, bucket.as_deref(), *page, query.as_deref())
                .await?;
            Ok(true)
        }
        Some(Commands::Config {
            show,
            reset,
            edit,
            path,
        }) => {
            if *path {
                handle_config_path()?;
            } else if *show {
                handle_config_show(&cli.source)?;
            } else if *reset {
                handle_config_reset()?;
            } else if *edit {
                handle_config_edit()?;
            } else {
                println!("Usage: testmarket config [--show|--reset|--edit|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --edit    Open config file in $EDITOR");
                println!("  --path    Show config file path");
            }
            Ok(true)
        }
        None => Ok(false),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// print
// ─────────────────────────────────────────────────────────────────────────────

async fn handle_print(
    args: &SourceArgs,
    board: BoardKind,
    bucket: Option<&str>,
    page: usize,
    query: Option<&str>,
) -> Result<()> {
    let mut config = Config::from_env()?;
    args.apply(&mut config.source);

    let mut source = Source::from_config(&config.source)?;
    let snapshot = source
        .fetch()
        .await
        .with_context(|| format!("Failed to fetch from {}", source.describe()))?
        .validate();
    if !snapshot.rejected.is_empty() {
        eprintln!("warning: {} record(s) rejected", snapshot.rejected.len());
    }

    let mut boards = Boards::new(&config.listing);
    boards.apply(snapshot, BoardKind::all());

    let view = boards.get_mut(board);
    if let Some(query) = query {
        view.set_query(query);
    }
    if let Some(bucket) = bucket {
        view.select_tab(bucket)?;
    }
    view.goto_page(page);

    print!("{}", render_table(&view.model(Utc::now())));
    Ok(())
}

/// Plain-text rendering of one board page
pub fn render_table(model: &BoardModel) -> String {
    let mut out = String::new();

    let active = model
        .tabs
        .get(model.active_tab)
        .map(|t| t.label)
        .unwrap_or_default();
    out.push_str(&format!("{} / {}\n", model.title, active));

    let tabs: Vec<String> = model
        .tabs
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            if i == model.active_tab {
                format!("[{} ({})]", tab.label, tab.count)
            } else {
                format!("{} ({})", tab.label, tab.count)
            }
        })
        .collect();
    out.push_str(&tabs.join("  "));
    out.push('\n');
    if !model.query.is_empty() {
        out.push_str(&format!("Search: {:?}\n", model.query));
    }
    out.push('\n');

    let widths: Vec<usize> = model.widths.iter().map(|&w| w as usize).collect();
    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| pad_to_width(cell, w))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let headers: Vec<String> = model.headers.iter().map(|h| h.to_string()).collect();
    out.push_str(&line(&headers));
    let rule_len = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');

    if model.rows.is_empty() {
        out.push_str("(no records)\n");
    }
    for row in &model.rows {
        out.push_str(&line(row));
    }
    out.push('\n');

    match model.item_range {
        Some((start, end)) => out.push_str(&format!(
            "Page {} of {}, records {}-{} of {}\n",
            model.page, model.total_pages, start, end, model.bucket_len
        )),
        None => out.push_str(&format!("Page {} of {}\n", model.page, model.total_pages)),
    }
    out.push_str(&pagination_text(&pagination_items(
        model.page,
        model.total_pages,
        1,
    )));
    out.push('\n');
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// config
// ─────────────────────────────────────────────────────────────────────────────

fn config_path() -> Result<PathBuf> {
    Config::config_path().ok_or_else(|| anyhow!("Could not determine config path"))
}

fn handle_config_path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

fn handle_config_show(args: &SourceArgs) -> Result<()> {
    let mut config = Config::from_env()?;
    args.apply(&mut config.source);

    println!("# Effective configuration (flags > env > file > defaults)");
    println!();
    print!("{}", config.to_toml());
    println!();
    match &config.source.token {
        Some(_) => println!("# Bearer token: set (from ${})", config.source.token_env),
        None => println!("# Bearer token: not set (${})", config.source.token_env),
    }

    let path = config_path()?;
    if path.exists() {
        println!("# Source: {}", path.display());
    } else {
        println!("# Source: defaults (no config file)");
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = config_path()?;

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

fn handle_config_edit() -> Result<()> {
    let path = config_path()?;

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .with_context(|| {
            format!(
                "Failed to launch editor '{}' (set $EDITOR to your preferred editor)",
                editor
            )
        })?;
    if !status.success() {
        anyhow::bail!("Editor exited with status: {}", status);
    }
    Ok(())
}
