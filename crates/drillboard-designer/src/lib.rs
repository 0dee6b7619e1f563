//! # Drillboard Designer
//!
//! This crate provides the tactical diagram editor: a virtual pitch on which
//! coaches place cones, players, goals, ladders, arrows and labels to
//! illustrate an exercise, with undo/redo and SVG output.
//!
//! ## Core Components
//!
//! ### Diagram Elements
//! - **Shapes**: Fifteen element types as one tagged union ([`ShapeKind`])
//! - **Scene**: Canvas size, name, description and the ordered shape list
//! - **Viewport**: Zoom and pan between surface pixels and scene units
//!
//! ### Editing
//! - **Editor**: Owns the scene and reduces input events into edits
//! - **Hit-testing**: Topmost-shape picking and selection handles
//! - **History**: Bounded snapshot undo/redo
//! - **Properties**: Read/write binding for a property panel
//!
//! ### Output
//! - **Renderer**: Shapes as drawing primitives
//! - **SVG Export**: Static thumbnails and the interactive surface
//! - **Bridge**: Loading from and saving into catalog entries
//!
//! ## Architecture
//!
//! ```text
//! Host events ──> Editor::dispatch ──> EditorEffect
//!                   ├── Viewport (screen -> scene)
//!                   ├── Hit-testing (handles, shapes)
//!                   ├── Scene (shapes)
//!                   └── History (snapshots)
//!
//! Scene ──> Renderer ──> SVG export
//!   └── Bridge <──> CatalogEntry / DiagramStore
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use drillboard_designer::{Editor, EditorEvent, ShapeType, Tool};
//!
//! let mut editor = Editor::default();
//! editor.set_tool(Tool::Create(ShapeType::Cone));
//! editor.dispatch(EditorEvent::press(100.0, 100.0));
//! editor.dispatch(EditorEvent::release(100.0, 100.0));
//!
//! let document = editor.save();
//! ```

pub mod bridge;
pub mod editor;
pub mod geometry;
pub mod history;
pub mod interaction;
pub mod model;
pub mod properties;
pub mod renderer;
pub mod scene;
pub mod svg_export;
pub mod viewport;

pub use bridge::{load_document, CatalogFileStore, DiagramStore, SceneDocument};
pub use editor::Editor;
pub use geometry::Point;
pub use history::History;
pub use hit_test::{hit_handle, hit_shape, Corner, Handle};
pub use interaction::{
    ArrowEnd, EditorEffect, EditorEvent, Gesture, Key, Modifiers, PointerButton, Tool,
};
pub use model::{Shape, ShapeError, ShapeId, ShapeKind, ShapeRecord, ShapeType};
pub use properties::{PanelField, PropertyPanel};
pub use renderer::{render_scene, render_shape, Drawable, Primitive, Tagging};
pub use scene::Scene;
pub use svg_export::{export_document, export_scene, render_interactive, ExportOptions};
pub use viewport::Viewport;
