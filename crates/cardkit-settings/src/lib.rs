//! CardKit Settings Crate
//!
//! Handles application configuration and its persistence.

pub mod config;
pub mod error;

pub use config::{config_dir, default_config_path, Config, EditorSettings, RenderSettings};
pub use error::{SettingsError, SettingsResult};
