mod api;
mod app;
mod config;
mod domain;
mod events;
mod input;
mod persistence;
mod row;
mod runner;
mod ui;

use anyhow::{Context, Result};
use api::{HttpTaskStore, TaskStore};
use app::AppState;
use clap::{Parser, Subcommand};
use config::Config;
use domain::{active_count, filter_tasks, Filter};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "todos")]
#[command(about = "A terminal todo list backed by a remote task API", long_about = None)]
struct Cli {
    /// Path to config.json. Defaults to the user config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Task API root (requests go to <BASE_URL>/todos)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Owner id for listed and created tasks
    #[arg(long, global = true)]
    user_id: Option<u64>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Print tasks once and exit
    List {
        /// Which tasks to print: all, active or completed
        #[arg(short, long, default_value = "all")]
        filter: Filter,
    },
}

fn setup_logging(level: Option<&str>) -> Result<()> {
    let log_dir = persistence::log_dir();
    persistence::ensure_dir(&log_dir)?;

    let level = match level.map(|s| s.to_uppercase()).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    let log_file = fs::File::create(log_dir.join("todos.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init { force }) = cli.command {
        let path = config::init_config(cli.config.as_deref(), force)?;
        println!("Wrote default config: {}", path.display());
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(cli.base_url, cli.user_id, cli.log_level);

    setup_logging(config.log_level.as_deref()).context("Failed to setup logging")?;
    info!(base_url = %config.base_url, user_id = config.user_id, "todos starting");

    let store = HttpTaskStore::new(&config.base_url, config.user_id, config.request_timeout())
        .context("Failed to create HTTP client")?;

    match cli.command {
        Some(Commands::List { filter }) => print_tasks(&store, filter).await,
        _ => run_tui(&config, Arc::new(store)).await,
    }
}

/// Non-interactive listing
async fn print_tasks(store: &dyn TaskStore, filter: Filter) -> Result<()> {
    let tasks = store.list().await.context("Unable to load todos")?;

    for task in filter_tasks(&tasks, filter) {
        let mark = if task.completed { "x" } else { " " };
        println!("[{}] {} (#{})", mark, task.title, task.id);
    }

    let left = active_count(&tasks);
    println!();
    println!("{} {} left", left, if left == 1 { "item" } else { "items" });
    Ok(())
}

async fn run_tui(config: &Config, store: Arc<dyn TaskStore>) -> Result<()> {
    let app = AppState::new(config.notification_timeout());
    let mut terminal = runner::init_terminal()?;

    let result = runner::Runner::new(app, store).run(&mut terminal).await;

    // Restore the terminal even if the loop failed
    if let Err(e) = runner::restore_terminal(&mut terminal) {
        warn!(error = %e, "failed to restore terminal");
        eprintln!("Error restoring terminal: {}", e);
    }

    result
}
