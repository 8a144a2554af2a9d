//! `scrawl.toml` loading.
//!
//! Every field is optional; anything missing falls back to the defaults
//! below. Unknown keys are ignored.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "scrawl.toml";

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub canvas: CanvasConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Print the command catalogue when the session starts.
    pub catalogue: bool,
    /// Render the grid with terminal colors.
    pub color: bool,
    pub prompt: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            catalogue: true,
            color: false,
            prompt: "Enter your command here :  ".to_string(),
        }
    }
}

/// Upper limits on canvas size accepted from the prompt.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CanvasConfig {
    pub max_width: i32,
    pub max_height: i32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            max_width: 1000,
            max_height: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Loads `path` if given, otherwise `scrawl.toml` from the working directory
/// when present. Without either the defaults are used.
///
/// A file that exists but cannot be read or parsed is an error; it never
/// silently falls back to the defaults.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !local.exists() {
                return Ok(Config::default());
            }
            local
        }
    };

    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let config = Config::from_toml(&content).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    debug!("loaded config from {}", path.display());
    Ok(config)
}
