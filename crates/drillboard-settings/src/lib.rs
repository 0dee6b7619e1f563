//! Drillboard Settings Crate
//!
//! Handles editor configuration and settings persistence.

pub mod config;
pub mod error;

pub use config::{CanvasSettings, EditorSettings, ExportSettings, GridSettings, HistorySettings};
pub use error::{SettingsError, SettingsResult};
