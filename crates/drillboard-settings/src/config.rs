//! Configuration for the diagram editor
//!
//! Settings are organized into sections:
//! - Grid settings (snapping, grid size, rotation step)
//! - History settings (undo depth)
//! - Canvas defaults (size of a new diagram)
//! - Export settings (thumbnail background and grid)
//!
//! Files are JSON or TOML, chosen by extension.

use drillboard_core::constants::{
    DEFAULT_GRID_SIZE, DEFAULT_HISTORY_CAPACITY, DEFAULT_ROTATION_STEP, DEFAULT_SCENE_HEIGHT,
    DEFAULT_SCENE_WIDTH,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SettingsError, SettingsResult};

const CONFIG_FILE_NAME: &str = "editor.toml";

/// Grid and snapping settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Snap positions and sizes to the grid
    pub snap_enabled: bool,
    /// Grid spacing in scene units
    pub size: f64,
    /// Snap interactive rotation to `rotation_step` increments
    pub snap_rotation: bool,
    /// Rotation increment for keys, wheel and snapped rotation, in degrees
    pub rotation_step: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            snap_enabled: true,
            size: DEFAULT_GRID_SIZE,
            snap_rotation: true,
            rotation_step: DEFAULT_ROTATION_STEP,
        }
    }
}

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of snapshots on the undo stack
    pub capacity: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// Canvas defaults for new or incomplete diagrams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCENE_WIDTH,
            height: DEFAULT_SCENE_HEIGHT,
        }
    }
}

/// Static export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Paint a pitch-green background behind the shapes
    pub background: bool,
    /// Draw the grid in exported thumbnails
    pub show_grid: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            background: true,
            show_grid: false,
        }
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditorSettings {
    pub grid: GridSettings,
    pub history: HistorySettings,
    pub canvas: CanvasSettings,
    pub export: ExportSettings,
}

impl EditorSettings {
    /// Platform config location, e.g. `~/.config/drillboard/editor.toml`.
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no platform config directory".to_string())
        })?;
        Ok(dir.join("drillboard").join(CONFIG_FILE_NAME))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let settings: Self = match extension(path).as_deref() {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                ))
            }
        };

        settings.validate()?;
        tracing::debug!("Loaded editor settings from {}", path.display());
        Ok(settings)
    }

    /// Loads the file when it exists, otherwise returns defaults.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No settings at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path).as_deref() {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                ))
            }
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.grid.size.is_finite() && self.grid.size >= 1.0) {
            return Err(SettingsError::invalid("grid.size", "must be >= 1"));
        }
        if !(self.grid.rotation_step.is_finite()
            && self.grid.rotation_step > 0.0
            && self.grid.rotation_step <= 180.0)
        {
            return Err(SettingsError::invalid(
                "grid.rotation_step",
                "must be in (0, 180]",
            ));
        }
        if self.history.capacity == 0 {
            return Err(SettingsError::invalid("history.capacity", "must be > 0"));
        }
        if !(self.canvas.width > 0.0 && self.canvas.height > 0.0) {
            return Err(SettingsError::invalid(
                "canvas",
                "width and height must be > 0",
            ));
        }
        Ok(())
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}
