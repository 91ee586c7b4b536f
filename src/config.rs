//! User preferences loaded from a TOML file in the config directory.
//!
//! Missing file or unreadable contents fall back to defaults; a bad config
//! never prevents startup.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::collab::export::EXPORT_THEMES;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Override for the database file; defaults to the user data directory.
    pub database_path: Option<PathBuf>,
    pub export: ExportPrefs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportPrefs {
    pub theme: String,
    pub font: String,
    pub font_size: u32,
    pub line_numbers: bool,
}

impl Default for ExportPrefs {
    fn default() -> Self {
        Self {
            theme: EXPORT_THEMES[0].to_string(),
            font: "Fira Code".to_string(),
            font_size: 16,
            line_numbers: true,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let Some(path) = config_file() else {
            return Self::default();
        };
        let Ok(contents) = fs::read_to_string(&path) else {
            return Self::default();
        };
        match toml::from_str(&contents) {
            Ok(config) => config,
            Err(err) => {
                warn!("ignoring invalid config at {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Resolved database path: the configured override, or
    /// `<data dir>/codesnap/snippets.db`.
    pub fn database_path(&self) -> PathBuf {
        if let Some(path) = &self.database_path {
            return path.clone();
        }
        data_dir().join("snippets.db")
    }
}

pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("codesnap")
}

fn config_file() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("codesnap").join("config.toml"))
}
