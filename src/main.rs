//! plank - a three-column terminal task board.
//!
//! This is the main binary: it loads configuration, sets up file logging,
//! opens the task store and hands the terminal to the board.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use plank_config::{Config, LoggingConfig};
use plank_store::{FileStore, KeyValueStore, MemoryStore, TaskStore};
use plank_tui::{App, terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install panic hook to restore terminal on panic
    terminal::install_panic_hook();

    let config = Config::load().await.context("failed to load configuration")?;
    let data_dir = config
        .storage
        .resolve_data_dir()
        .context("failed to locate data directory")?;
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create {}", data_dir.display()))?;

    init_logging(&config.logging, &data_dir)?;
    info!(
        data_dir = %data_dir.display(),
        persist = config.storage.persist,
        "starting plank"
    );

    let backend: Box<dyn KeyValueStore> = if config.storage.persist {
        Box::new(FileStore::open(&data_dir)?)
    } else {
        info!("persistence disabled, changes will be lost on exit");
        Box::new(MemoryStore::new())
    };
    let store = TaskStore::open(backend).context("failed to open task store")?;

    let mut terminal = terminal::setup_terminal()?;
    let mut app = App::new(store);
    let result = app.run(&mut terminal).await;

    // Always restore terminal, even if app.run() failed
    terminal::restore_terminal(&mut terminal)?;

    info!("exiting");
    result
}

/// Sends tracing output to the log file, since the board owns the terminal.
fn init_logging(logging: &LoggingConfig, data_dir: &Path) -> anyhow::Result<()> {
    let path = logging.resolve_file(data_dir);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_new(&logging.level)
        .with_context(|| format!("invalid log level '{}'", logging.level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
