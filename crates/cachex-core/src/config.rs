use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::container::{ContainerLayout, LineEnding, DEFAULT_HEADER_SIZE, DEFAULT_KEY_MARKER};

/// Default cache directory to read containers from.
pub const DEFAULT_SOURCE_DIR: &str = "./input";
/// Default root the extracted tree is written under.
pub const DEFAULT_DEST_DIR: &str = "./output";

/// What a batch run does after one container fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop the walk and return the first failure.
    Abort,
    /// Record the failure and move on to the next container.
    #[default]
    Continue,
}

/// Global configuration loaded from `~/.config/cachex/config.toml`.
/// Missing keys fall back to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CachexConfig {
    /// Cache directory walked for container files.
    pub source_dir: PathBuf,
    /// Root of the reconstructed file tree.
    pub dest_dir: PathBuf,
    /// Bytes of binary header before the metadata block.
    pub header_size: u64,
    /// Prefix of the metadata line that carries the key.
    pub key_marker: String,
    /// Terminator accounting used when computing the body offset: "measured", "lf" or "crlf".
    pub line_ending: LineEnding,
    /// "continue" (default) or "abort" on the first failed container.
    pub on_error: ErrorPolicy,
    /// Follow `..` in keys instead of rejecting them. Only for trusted caches.
    pub allow_parent_components: bool,
}

impl Default for CachexConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            dest_dir: PathBuf::from(DEFAULT_DEST_DIR),
            header_size: DEFAULT_HEADER_SIZE,
            key_marker: DEFAULT_KEY_MARKER.to_string(),
            line_ending: LineEnding::default(),
            on_error: ErrorPolicy::default(),
            allow_parent_components: false,
        }
    }
}

impl CachexConfig {
    /// Container format parameters derived from this config.
    pub fn layout(&self) -> ContainerLayout {
        ContainerLayout {
            header_size: self.header_size,
            key_marker: self.key_marker.clone(),
            line_ending: self.line_ending,
        }
    }
}

/// Where the config file is looked up: `~/.config/cachex/config.toml`.
/// Nothing is created on disk.
pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cachex")?;
    Ok(xdg_dirs.get_config_file("config.toml"))
}

/// Load configuration from the XDG config dirs, or built-in defaults when no
/// config file exists. Never writes.
pub fn load() -> Result<CachexConfig> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cachex")?;
    match xdg_dirs.find_config_file("config.toml") {
        Some(path) => load_from_path(&path),
        None => {
            tracing::debug!("no config file, using defaults");
            Ok(CachexConfig::default())
        }
    }
}

/// Load configuration from `path`, or defaults if it does not exist.
pub fn load_from_path(path: &Path) -> Result<CachexConfig> {
    if !path.exists() {
        return Ok(CachexConfig::default());
    }
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: CachexConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(cfg)
}
