//! Logging setup
//!
//! The TUI owns the terminal, so it logs to a file. Log path fallback chain:
//! 1. Explicit path (--log-file or [log] file)
//! 2. $XDG_STATE_HOME/home-court/courtctl.log
//! 3. ~/.local/state/home-court/courtctl.log
//!
//! If no file can be opened the TUI drops its logs; stderr would draw over
//! the alternate screen. COURT_LOG overrides the configured filter.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILTER_ENV: &str = "COURT_LOG";
const LOG_FILE_NAME: &str = "courtctl.log";

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Discard,
}

/// Discover the default log file path
pub fn discover_log_path() -> Option<PathBuf> {
    if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
        if !xdg_state.is_empty() {
            return Some(Path::new(&xdg_state).join("home-court").join(LOG_FILE_NAME));
        }
    }

    dirs::home_dir().map(|home| {
        home.join(".local")
            .join("state")
            .join("home-court")
            .join(LOG_FILE_NAME)
    })
}

/// Open a log file for appending, creating its directory
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// Where the TUI logs: the explicit or discovered file if it opens, else nowhere
pub fn tui_target(explicit: Option<PathBuf>) -> LogTarget {
    match explicit.or_else(discover_log_path) {
        Some(path) if open_log_file(&path).is_ok() => LogTarget::File(path),
        _ => LogTarget::Discard,
    }
}

/// Build the filter: COURT_LOG if set, else the configured level
pub fn build_filter(default_level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_env(LOG_FILTER_ENV) {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_level)
            .with_context(|| format!("Invalid log filter '{}'", default_level)),
    }
}

/// Install the global subscriber
pub fn init(default_level: &str, target: LogTarget) -> Result<()> {
    let filter = build_filter(default_level)?;

    let installed = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        LogTarget::File(path) => {
            let file = open_log_file(&path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogTarget::Discard => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .try_init(),
    };

    installed.map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))
}

/// Install the TUI subscriber. Never writes to the terminal.
pub fn init_tui(default_level: &str, explicit: Option<PathBuf>) -> Result<LogTarget> {
    let target = tui_target(explicit);
    init(default_level, target.clone())?;
    Ok(target)
}
