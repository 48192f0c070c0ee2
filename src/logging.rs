//! File logging.
//!
//! The terminal is in raw mode on the alternate screen while playing, so
//! events go to an append-mode file instead of stdout.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Build an `EnvFilter` from a directive string such as `info` or
/// `tui_2048=debug`.
pub fn build_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).with_context(|| format!("invalid log filter `{directives}`"))
}

/// Install the global subscriber writing to `file`.
pub fn init(file: &Path, directives: &str) -> Result<()> {
    let filter = build_filter(directives)?;

    if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file)
        .with_context(|| format!("open log file {}", file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!(e))
        .context("install tracing subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_level_and_target_directives() {
        assert!(build_filter("info").is_ok());
        assert!(build_filter("warn,tui_2048=debug").is_ok());
    }

    #[test]
    fn rejects_malformed_directive() {
        assert!(build_filter("tui_2048=verbose").is_err());
    }
}
