//! Application configuration.
//!
//! Settings come from built-in defaults, then an optional TOML file, then
//! environment overrides (`TUI_2048_SEED`, `TUI_2048_LOG`). Command-line flags
//! are applied last by the binary.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::types::{MILESTONE_DISPLAY_MS, STATIC_REDRAW_MS, TICK_MS};

pub const SEED_ENV: &str = "TUI_2048_SEED";
pub const LOG_ENV: &str = "TUI_2048_LOG";

const CELL_WIDTH_RANGE: std::ops::RangeInclusive<u16> = 5..=12;
const CELL_HEIGHT_RANGE: std::ops::RangeInclusive<u16> = 1..=5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Fixed RNG seed. `None` derives one from the clock at startup.
    pub seed: Option<u32>,
    pub tick_ms: u32,
    pub milestone_display_ms: u64,
    pub static_redraw_ms: u64,
    /// Capture the mouse for the restart button.
    pub mouse: bool,
    pub log: LogConfig,
    pub view: ViewConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            tick_ms: TICK_MS,
            milestone_display_ms: MILESTONE_DISPLAY_MS,
            static_redraw_ms: STATIC_REDRAW_MS,
            mouse: true,
            log: LogConfig::default(),
            view: ViewConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub file: PathBuf,
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("tui-2048.log"),
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    pub cell_width: u16,
    pub cell_height: u16,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            cell_width: 7,
            cell_height: 3,
        }
    }
}

/// `$XDG_CONFIG_HOME/tui-2048/config.toml` (or the platform equivalent).
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tui-2048").join("config.toml"))
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Load from `explicit` when given, else from [`default_path`] if that file
    /// exists, else fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Apply environment overrides. `lookup` is usually `std::env::var(..).ok()`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(SEED_ENV) {
            let seed = raw
                .trim()
                .parse::<u32>()
                .map_err(|e| ConfigError::invalid("TUI_2048_SEED", e.to_string()))?;
            self.seed = Some(seed);
        }
        if let Some(filter) = lookup(LOG_ENV) {
            if !filter.trim().is_empty() {
                self.log.filter = filter;
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::invalid("tick_ms", "must be greater than 0"));
        }
        if !CELL_WIDTH_RANGE.contains(&self.view.cell_width) {
            return Err(ConfigError::invalid(
                "view.cell_width",
                format!(
                    "{} is outside {}..={}",
                    self.view.cell_width,
                    CELL_WIDTH_RANGE.start(),
                    CELL_WIDTH_RANGE.end()
                ),
            ));
        }
        if !CELL_HEIGHT_RANGE.contains(&self.view.cell_height) {
            return Err(ConfigError::invalid(
                "view.cell_height",
                format!(
                    "{} is outside {}..={}",
                    self.view.cell_height,
                    CELL_HEIGHT_RANGE.start(),
                    CELL_HEIGHT_RANGE.end()
                ),
            ));
        }
        Ok(())
    }
}
