//! FenceKit Settings Crate
//!
//! Loads and saves the fence configuration and canvas preferences.

pub mod config;
pub mod error;

pub use config::{default_config_path, Settings, ViewSettings};
pub use error::{SettingsError, SettingsResult};
