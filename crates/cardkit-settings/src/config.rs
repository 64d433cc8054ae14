//! Configuration for CardKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into sections:
//! - Editor settings (history depth, autosave)
//! - Handle metrics (hit-test and handle geometry)
//! - Render settings (sheet resolution)

use cardkit_core::constants::HISTORY_DEPTH;
use cardkit_core::HandleMetrics;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SettingsError, SettingsResult};

const APP_DIR: &str = "cardkit";
const CONFIG_FILE: &str = "config.toml";
const SESSION_FILE: &str = "session.json";

/// Editor behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Maximum number of undo snapshots
    pub history_depth: usize,
    /// Save the session after every recorded change
    pub autosave: bool,
    /// Autosave file; the platform data directory is used when unset
    pub autosave_file: Option<PathBuf>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            history_depth: HISTORY_DEPTH,
            autosave: true,
            autosave_file: None,
        }
    }
}

/// Output rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Resolution of imposed print sheets
    pub sheet_dpi: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self { sheet_dpi: 300 }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub editor: EditorSettings,
    pub handles: HandleMetrics,
    pub render: RenderSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// A missing default config file yields the defaults; an explicitly
    /// named file must exist.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.editor.history_depth == 0 {
            return Err(SettingsError::invalid(
                "editor.history_depth",
                "must be at least 1",
            ));
        }

        if let Some(field) = self.handles.first_invalid() {
            return Err(SettingsError::invalid(
                format!("handles.{}", field),
                "must be a positive number",
            ));
        }

        if self.render.sheet_dpi == 0 {
            return Err(SettingsError::invalid("render.sheet_dpi", "must be > 0"));
        }

        Ok(())
    }

    /// Where the autosaved session lives, if autosave is enabled.
    pub fn autosave_path(&self) -> Option<PathBuf> {
        if !self.editor.autosave {
            return None;
        }
        self.editor
            .autosave_file
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join(APP_DIR).join(SESSION_FILE)))
    }
}

/// Platform config directory for CardKit, e.g. `~/.config/cardkit`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR))
}

/// Default config file location.
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join(CONFIG_FILE))
}
