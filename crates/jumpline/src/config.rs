//! Configuration file handling for the CLI.
//!
//! Settings live in `<config dir>/jumpline/config.toml`, e.g.
//! `~/.config/jumpline/config.toml` on Linux. Command-line flags win over
//! anything set here.

use anyhow::{Context, Result};
use jumpline_core::Direction;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "jumpline";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Git revision whose copy of the file is the original side
    pub base: String,
    /// Compare against the index instead of `base`
    pub staged: bool,
    /// Jump direction when `--direction` is not given
    pub direction: Direction,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base: "HEAD".to_string(),
            staged: false,
            direction: Direction::Auto,
        }
    }
}

impl Config {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid config file")
    }
}

/// Default location of the config file, if the platform has a config dir
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILENAME))
}

/// Load the config from `custom`, or from the default location.
///
/// A missing file at the default location yields the defaults; a missing
/// file that was asked for explicitly is an error.
pub fn load(custom: Option<&Path>) -> Result<Config> {
    let path = match custom {
        Some(path) => path.to_path_buf(),
        None => match default_path() {
            Some(path) if path.exists() => path,
            _ => {
                log::debug!("No config file found, using defaults");
                return Ok(Config::default());
            }
        },
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = Config::parse(&text)
        .with_context(|| format!("Failed to load config file: {}", path.display()))?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}
