//! Exercise catalog records.
//!
//! The catalog is owned by the host application. The diagram editor only reads
//! and writes the `diagram` field of an entry plus mirrors of its name and
//! description; the bucket an entry lives in is the host's business.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CatalogError;

/// One exercise in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CatalogEntry {
    pub id: String,
    /// Stored as `nom`; `name` is accepted on read.
    #[serde(default, rename = "nom", alias = "name")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Equipment list shown on the exercise card.
    #[serde(default)]
    pub materiel: Vec<String>,
    /// Stored scene document, opaque to the catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram: Option<Value>,
    /// Fields written by other parts of the host, kept untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogEntry {
    /// Creates an empty entry with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// The three catalog buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    /// Collective games
    Games,
    /// Individual drills
    Drills,
    /// Mobility work
    Mobility,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 3] = [Self::Games, Self::Drills, Self::Mobility];
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Games => write!(f, "games"),
            Self::Drills => write!(f, "drills"),
            Self::Mobility => write!(f, "mobility"),
        }
    }
}

impl FromStr for CatalogKind {
    type Err = CatalogError;

    /// Accepts both the English names and the short bucket keys stored by
    /// older hosts (`jeux`, `jeu`, `entr`, `mob`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "games" | "game" | "jeux" | "jeu" => Ok(Self::Games),
            "drills" | "drill" | "entr" => Ok(Self::Drills),
            "mobility" | "mob" => Ok(Self::Mobility),
            other => Err(CatalogError::UnknownKind(other.to_string())),
        }
    }
}

/// Full catalog as persisted by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Catalog {
    #[serde(default, rename = "jeuxFoot")]
    pub games: Vec<CatalogEntry>,
    #[serde(default, rename = "entrainements")]
    pub drills: Vec<CatalogEntry>,
    #[serde(default, rename = "mobilite")]
    pub mobility: Vec<CatalogEntry>,
    /// Other top-level keys of the host's file, kept untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a catalog from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = serde_json::from_str(&content)?;
        tracing::debug!("Loaded catalog from {}", path.display());
        Ok(catalog)
    }

    /// Writes the catalog as pretty JSON.
    pub fn save_to_file(&self, path: &Path) -> Result<(), CatalogError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::debug!("Saved catalog to {}", path.display());
        Ok(())
    }

    pub fn bucket(&self, kind: CatalogKind) -> &[CatalogEntry] {
        match kind {
            CatalogKind::Games => &self.games,
            CatalogKind::Drills => &self.drills,
            CatalogKind::Mobility => &self.mobility,
        }
    }

    pub fn bucket_mut(&mut self, kind: CatalogKind) -> &mut Vec<CatalogEntry> {
        match kind {
            CatalogKind::Games => &mut self.games,
            CatalogKind::Drills => &mut self.drills,
            CatalogKind::Mobility => &mut self.mobility,
        }
    }

    pub fn find(&self, kind: CatalogKind, id: &str) -> Option<&CatalogEntry> {
        self.bucket(kind).iter().find(|e| e.id == id)
    }

    pub fn find_mut(&mut self, kind: CatalogKind, id: &str) -> Option<&mut CatalogEntry> {
        self.bucket_mut(kind).iter_mut().find(|e| e.id == id)
    }

    /// Looks an id up in every bucket.
    pub fn locate(&self, id: &str) -> Option<(CatalogKind, &CatalogEntry)> {
        CatalogKind::ALL
            .into_iter()
            .find_map(|kind| self.find(kind, id).map(|e| (kind, e)))
    }

    /// Replaces the entry with the same id, or appends it.
    pub fn upsert(&mut self, kind: CatalogKind, entry: CatalogEntry) {
        let bucket = self.bucket_mut(kind);
        match bucket.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => bucket.push(entry),
        }
    }

    /// Moves an entry to another bucket, keeping its content.
    pub fn move_entry(
        &mut self,
        id: &str,
        from: CatalogKind,
        to: CatalogKind,
    ) -> Result<(), CatalogError> {
        if from == to {
            return Ok(());
        }
        let source = self.bucket_mut(from);
        let idx = source
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CatalogError::EntryNotFound {
                id: id.to_string(),
                kind: from.to_string(),
            })?;
        let entry = source.remove(idx);
        self.upsert(to, entry);
        Ok(())
    }
}
