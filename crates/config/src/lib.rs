//! User settings, read from `config.toml` in the platform configuration directory
//!
//! ```toml
//! language = "java"
//! debounce_ms = 250
//! storage_dir = "/home/me/.codeviz"
//! ```

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use eyre::Context;
use serde::Deserialize;
use store::{Language, StackMemory};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Language selected at startup
    pub language: Language,

    /// Quiet period before re-validating after an edit
    pub debounce_ms: u64,

    /// Where save slots live (defaults to the platform data directory)
    pub storage_dir: Option<PathBuf>,

    pub max_stack_size: usize,

    pub animation_speed: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::default(),
            debounce_ms: diagnostics::DEFAULT_DELAY.as_millis() as u64,
            storage_dir: None,
            max_stack_size: StackMemory::DEFAULT_MAX_SIZE,
            animation_speed: 1.0,
        }
    }
}

impl Config {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Location of the configuration file
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("codeviz").join("config.toml"))
}

pub fn from_str(contents: &str) -> eyre::Result<Config> {
    let config = toml::from_str(contents).context("parsing configuration")?;
    Ok(config)
}

pub fn load_from(path: impl AsRef<Path>) -> eyre::Result<Config> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading configuration file {}", path.display()))?;
    from_str(&contents).with_context(|| format!("loading {}", path.display()))
}

/// Load the configuration from [`default_path`], using defaults when there is no file
pub fn load() -> eyre::Result<Config> {
    let Some(path) = default_path() else {
        tracing::debug!("no configuration directory, using defaults");
        return Ok(Config::default());
    };

    if !path.exists() {
        tracing::debug!(path = %path.display(), "no configuration file, using defaults");
        return Ok(Config::default());
    }

    load_from(&path)
}
