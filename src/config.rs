//! Tastecheck configuration.
//!
//! Loaded from `<data-root>/config.toml` (default `~/.tastecheck/config.toml`).
//! A missing file means defaults; the file is only written when a preference
//! such as the theme changes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::Theme;

const CONFIG_FILE: &str = "config.toml";

/// Errors that can occur while reading or writing the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("invalid config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Tastecheck configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Terminal palette.
    pub theme: Theme,

    /// How long the confirmation screen shows "Analyzing your feedback..."
    /// before the summary message appears.
    pub analysis_delay_ms: u64,

    /// Recipient for `tastecheck contact` mailto links.
    pub contact_address: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            analysis_delay_ms: 2000,
            contact_address: "hello@tastecheck.dev".to_string(),
        }
    }
}

impl Config {
    /// Load config from `path`, falling back to defaults if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write config to `path`, creating its directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string(self)?;
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, contents).map_err(write_err)
    }

    /// The config file path inside a data root.
    pub fn path_in(data_root: &Path) -> PathBuf {
        data_root.join(CONFIG_FILE)
    }

    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }
}

/// The default data root: `~/.tastecheck/`.
pub fn default_data_root() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tastecheck"))
}
