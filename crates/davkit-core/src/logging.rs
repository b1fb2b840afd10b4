//! `tracing` setup for the davkit binary.
//!
//! Events go to `~/.local/state/davkit/davkit.log` when that file can be
//! opened; [`init_logging_stderr`] is the fallback. `RUST_LOG` overrides the
//! default filter.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,davkit=debug,davkit_core=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Location of the log file under the XDG state directory.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("davkit")?;
    Ok(xdg_dirs.get_state_home().join("davkit.log"))
}

/// Log to the XDG state file. Errors are returned so the caller can fall back to stderr.
pub fn init_logging() -> Result<()> {
    init_logging_to(&log_file_path()?)
}

/// Append log events to `path`, creating its directory if needed.
pub fn init_logging_to(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing::info!(path = %path.display(), "davkit logging started");
    Ok(())
}

/// Log to stderr. A subscriber that is already installed is left in place.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
