use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Env var naming the TUI log file.
pub const LOG_FILE_ENV: &str = "BENCHDASH_LOG";

fn filter(verbose: bool) -> EnvFilter {
    let level = if verbose { "benchdash=debug" } else { "benchdash=info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Subcommands log to stderr.
pub fn init_stderr(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// The TUI owns the terminal, so it only logs when a file is configured.
pub fn init_tui(verbose: bool) -> Result<Option<PathBuf>> {
    let Some(path) = std::env::var_os(LOG_FILE_ENV).map(PathBuf::from) else {
        return Ok(None);
    };
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .try_init();
    Ok(Some(path))
}
