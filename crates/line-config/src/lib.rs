//! Configuration loading and parsing.
//!
//! Parses `lined.toml` (or an override path supplied by the host) extracting
//! the `[editing]` table: which keymap flavor a fresh session starts in and
//! the undo history cap. Unknown fields are ignored so the file can grow
//! without breaking older binaries; a malformed file falls back to defaults
//! rather than failing the session.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

/// Key-binding philosophy selecting the initial mode of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeymapFlavor {
    #[default]
    Emacs,
    Vi,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EditingConfig {
    #[serde(default)]
    pub keymap: KeymapFlavor,
    #[serde(default = "EditingConfig::default_undo_history")]
    pub undo_history: usize,
}

impl Default for EditingConfig {
    fn default() -> Self {
        Self {
            keymap: KeymapFlavor::default(),
            undo_history: Self::default_undo_history(),
        }
    }
}

impl EditingConfig {
    const fn default_undo_history() -> usize {
        200
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub editing: EditingConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>,
    pub file: ConfigFile,
}

/// Best-effort config path: working directory first, then the platform
/// config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("lined.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("lined").join("lined.toml");
    }
    PathBuf::from("lined.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    if let Ok(content) = fs::read_to_string(&path) {
        match toml::from_str::<ConfigFile>(&content) {
            Ok(file) => {
                info!(
                    target: "config",
                    keymap = ?file.editing.keymap,
                    undo_history = file.editing.undo_history,
                    "config_loaded"
                );
                Ok(Config {
                    raw: Some(content),
                    file,
                })
            }
            Err(e) => {
                // Parse errors fall back to defaults; a bad config must not
                // take down the session.
                warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
                Ok(Config::default())
            }
        }
    } else {
        Ok(Config::default())
    }
}
