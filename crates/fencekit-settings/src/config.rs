//! Settings file handling.
//!
//! Settings are stored as TOML in the platform config directory by default.
//! A path ending in `.json` is read and written as JSON instead. Values read
//! from disk go through the same guards as the interactive setters, so a
//! hand-edited file can never put the tool into an invalid state.

use std::path::{Path, PathBuf};

use fencekit_core::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use fencekit_core::FenceConfig;
use serde::{Deserialize, Serialize};

use crate::error::{SettingsError, SettingsResult};

const APP_DIR: &str = "fencekit";
const SETTINGS_FILE: &str = "settings.toml";

/// Canvas preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Logical canvas width in pixels
    pub canvas_width: f64,
    /// Logical canvas height in pixels
    pub canvas_height: f64,
    /// Draw the 5 ft background grid
    pub show_grid: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            show_grid: true,
        }
    }
}

impl ViewSettings {
    /// Checks the canvas dimensions.
    pub fn validate(&self) -> SettingsResult<()> {
        for (key, value) in [
            ("view.canvas_width", self.canvas_width),
            ("view.canvas_height", self.canvas_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::InvalidSetting {
                    key: key.to_string(),
                    reason: format!("{} is not a positive size", value),
                });
            }
        }
        Ok(())
    }

    fn sanitized(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                tracing::warn!("{}; using default canvas size", e);
                Self {
                    show_grid: self.show_grid,
                    ..Self::default()
                }
            }
        }
    }
}

/// Complete persisted configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fence: FenceConfig,
    pub view: ViewSettings,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings from `path`. Invalid values fall back to defaults.
    pub fn load(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let settings: Self = if is_json(path) {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };

        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings.sanitized())
    }

    /// Loads settings from `path`, using defaults if the file is missing or
    /// unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("{}; using default settings", e);
            Self::default()
        })
    }

    /// Writes settings to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> SettingsResult<()> {
        self.view.validate()?;

        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;

        tracing::info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Replaces any invalid value with its default.
    pub fn sanitized(self) -> Self {
        Self {
            fence: self.fence.sanitized(),
            view: self.view.sanitized(),
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Platform settings file, e.g. `~/.config/fencekit/settings.toml` on Linux.
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
        .ok_or_else(|| {
            SettingsError::ConfigDirectory("platform config directory not available".to_string())
        })
}
