//! # Drillboard
//!
//! Tactical diagram editor core for youth-sports session planning:
//! - A virtual pitch with cones, players, goals, ladders, arrows and labels
//! - Pointer/keyboard editing with snapping, rotation and undo/redo
//! - Static SVG thumbnails of stored diagrams
//! - Loading from and saving into an exercise catalog
//!
//! ## Architecture
//!
//! Drillboard is organized as a workspace with multiple crates:
//!
//! 1. **drillboard-core** - Error types, shared constants, catalog records
//! 2. **drillboard-settings** - Editor configuration and persistence
//! 3. **drillboard-designer** - Scene model, editor, renderer, bridge
//! 4. **drillboard** - Command-line front end that integrates all crates

pub use drillboard_core::data;
pub use drillboard_designer as designer;

pub use drillboard_core::{
    BridgeError, Catalog, CatalogEntry, CatalogError, CatalogKind, Error, Result, StoreError,
};

pub use drillboard_designer::{
    export_document, export_scene, load_document, render_interactive, CatalogFileStore,
    DiagramStore, Editor, EditorEffect, EditorEvent, ExportOptions, PanelField, PropertyPanel,
    Scene, SceneDocument, Shape, ShapeId, ShapeType, Tool,
};

pub use drillboard_settings::{EditorSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Log output style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, multi-line
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, so stdout stays free for rendered documents
/// - RUST_LOG environment variable support
/// - INFO as the baseline level
pub fn init_logging() -> anyhow::Result<()> {
    init_logging_with(LogFormat::Pretty)
}

/// Initialize logging in the given output style
pub fn init_logging_with(format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    match format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_line_number(true)
                .pretty();
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .json();
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(())
}
