//! Loading and saving diagrams.
//!
//! A stored diagram is a JSON object `{ width, height, name, description,
//! items }` living in the `diagram` field of a catalog entry. Reading is
//! forgiving: anything missing or malformed falls back to a default and bad
//! items are dropped with a warning. Writing goes through a host-provided
//! [`DiagramStore`], whose failures are surfaced as [`BridgeError::Store`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use drillboard_core::constants::{DEFAULT_SCENE_HEIGHT, DEFAULT_SCENE_WIDTH};
use drillboard_core::data::{Catalog, CatalogEntry, CatalogKind};
use drillboard_core::{BridgeError, CatalogError, StoreError};

use crate::editor::Editor;
use crate::model::{Shape, ShapeRecord};
use crate::scene::Scene;

/// Interchange form of a diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDocument {
    pub width: f64,
    pub height: f64,
    pub name: String,
    pub description: String,
    pub items: Vec<ShapeRecord>,
}

impl Default for SceneDocument {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCENE_WIDTH,
            height: DEFAULT_SCENE_HEIGHT,
            name: String::new(),
            description: String::new(),
            items: Vec::new(),
        }
    }
}

impl SceneDocument {
    /// Reads a document from arbitrary JSON without failing.
    ///
    /// Sizes must be positive numbers (numeric strings are accepted), text
    /// fields must be strings, and each item must be an object that reads
    /// as a [`ShapeRecord`]; anything else takes the default or is dropped.
    pub fn from_value(value: &Value) -> Self {
        let mut document = SceneDocument::default();
        let Some(object) = value.as_object() else {
            if !value.is_null() {
                warn!("Diagram is not a JSON object, starting empty");
            }
            return document;
        };

        if let Some(width) = object.get("width").and_then(positive_number) {
            document.width = width;
        }
        if let Some(height) = object.get("height").and_then(positive_number) {
            document.height = height;
        }
        if let Some(name) = object.get("name").and_then(Value::as_str) {
            document.name = name.to_string();
        }
        if let Some(description) = object.get("description").and_then(Value::as_str) {
            document.description = description.to_string();
        }

        let items: &[Value] = match object.get("items") {
            Some(Value::Array(items)) => items.as_slice(),
            Some(Value::Null) | None => &[],
            Some(_) => {
                warn!("Diagram 'items' is not an array, ignoring it");
                &[]
            }
        };
        for (index, item) in items.iter().enumerate() {
            if !item.is_object() {
                warn!("Dropping item {}: not an object", index);
                continue;
            }
            match serde_json::from_value::<ShapeRecord>(item.clone()) {
                Ok(record) => document.items.push(record),
                Err(e) => warn!("Dropping item {}: {}", index, e),
            }
        }

        document
    }

    /// Canvas size, with non-positive values replaced by the defaults.
    pub fn canvas(&self) -> (f64, f64) {
        let pick = |v: f64, default: f64| if v.is_finite() && v > 0.0 { v } else { default };
        (
            pick(self.width, DEFAULT_SCENE_WIDTH),
            pick(self.height, DEFAULT_SCENE_HEIGHT),
        )
    }

    /// Builds an editable scene. Items of unknown type are dropped and
    /// duplicate ids are replaced.
    pub fn into_scene(self) -> Scene {
        let (width, height) = self.canvas();
        let mut scene = Scene::new(width, height);
        scene.name = self.name;
        scene.description = self.description;

        for record in self.items {
            let mut shape = match Shape::try_from(record) {
                Ok(shape) => shape,
                Err(e) => {
                    warn!("Dropping item: {}", e);
                    continue;
                }
            };
            if scene.contains_id(&shape.id) {
                let fresh = scene.generate_id(shape.shape_type());
                warn!("Duplicate shape id {}, renamed to {}", shape.id, fresh);
                shape.id = fresh;
            }
            scene.add(shape);
        }
        scene
    }
}

impl From<&Scene> for SceneDocument {
    fn from(scene: &Scene) -> Self {
        Self {
            width: scene.width,
            height: scene.height,
            name: scene.name.clone(),
            description: scene.description.clone(),
            items: scene.items().iter().map(ShapeRecord::from).collect(),
        }
    }
}

fn positive_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (number.is_finite() && number > 0.0).then_some(number)
}

/// Reads a stored diagram into a scene. Never fails.
pub fn load_document(value: &Value) -> Scene {
    SceneDocument::from_value(value).into_scene()
}

/// Host-side persistence for catalog entries.
pub trait DiagramStore {
    type Error: Into<StoreError>;

    /// Persists `entry`, replacing any stored entry with the same id.
    fn store(&mut self, entry: &CatalogEntry) -> Result<(), Self::Error>;
}

/// Stores entries into a catalog JSON file, under one bucket.
///
/// An entry found in another bucket is moved; a missing file is created.
#[derive(Debug, Clone)]
pub struct CatalogFileStore {
    path: PathBuf,
    kind: CatalogKind,
}

impl CatalogFileStore {
    pub fn new(path: impl Into<PathBuf>, kind: CatalogKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }
}

impl DiagramStore for CatalogFileStore {
    type Error = CatalogError;

    fn store(&mut self, entry: &CatalogEntry) -> Result<(), CatalogError> {
        let mut catalog = if self.path.exists() {
            Catalog::load_from_file(&self.path)?
        } else {
            Catalog::new()
        };
        let current = catalog.locate(&entry.id).map(|(kind, _)| kind);
        if let Some(current) = current {
            catalog.move_entry(&entry.id, current, self.kind)?;
        }
        catalog.upsert(self.kind, entry.clone());
        catalog.save_to_file(&self.path)
    }
}

impl Editor {
    /// Opens a catalog entry for editing. The entry's own name and
    /// description win over those stored in its diagram.
    pub fn load_entry(&mut self, entry: &CatalogEntry) {
        let mut scene = entry
            .diagram
            .as_ref()
            .map(load_document)
            .unwrap_or_default();
        if !entry.name.trim().is_empty() {
            scene.name = entry.name.clone();
        }
        if !entry.description.trim().is_empty() {
            scene.description = entry.description.clone();
        }
        self.replace_scene(scene);
        self.edit_target = Some(entry.clone());
        info!(
            "Loaded entry {} with {} shapes",
            entry.id,
            self.scene().len()
        );
    }

    /// Replaces the scene with a stored diagram, keeping the edit target.
    pub fn load_value(&mut self, value: &Value) {
        self.replace_scene(load_document(value));
        info!("Loaded diagram with {} shapes", self.scene().len());
    }

    /// Entry the scene will be saved into.
    pub fn edit_target(&self) -> Option<&CatalogEntry> {
        self.edit_target.as_ref()
    }

    pub fn save(&self) -> SceneDocument {
        SceneDocument::from(self.scene())
    }

    /// Writes the scene into `entry`, which must be the loaded edit target.
    /// Name and description are mirrored onto the entry, empty ones included.
    pub fn save_into(&self, entry: &mut CatalogEntry) -> Result<(), BridgeError> {
        let target = self.edit_target.as_ref().ok_or(BridgeError::NoEditTarget)?;
        if target.id != entry.id {
            return Err(BridgeError::TargetMismatch {
                expected: target.id.clone(),
                actual: entry.id.clone(),
            });
        }

        let document = self.save();
        entry.name = document.name.clone();
        entry.description = document.description.clone();
        entry.diagram = Some(serde_json::to_value(&document)?);
        Ok(())
    }

    /// Saves into the edit target and hands it to `store`. On success the
    /// stored entry becomes the new edit target and is returned.
    pub fn save_to<S: DiagramStore>(&mut self, store: &mut S) -> Result<CatalogEntry, BridgeError> {
        let mut entry = self
            .edit_target
            .clone()
            .ok_or(BridgeError::NoEditTarget)?;
        self.save_into(&mut entry)?;
        store.store(&entry).map_err(BridgeError::store)?;
        info!("Saved diagram into entry {}", entry.id);
        self.edit_target = Some(entry.clone());
        Ok(entry)
    }
}
