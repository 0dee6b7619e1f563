//! Error handling for Drillboard
//!
//! Malformed scenes, bad numeric input and unknown shape types degrade to
//! defaults inside the editor core. The errors here cover the places where
//! the caller must be told something went wrong:
//! - Bridge errors (saving without a target, host store failures)
//! - Catalog errors (reading/writing the host catalog file)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Boxed error coming from a host-provided store.
pub type StoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Persistence bridge error type
///
/// Raised when the editor is asked to hand its scene over to the host.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// No catalog entry has been loaded into the editor
    #[error("No exercise loaded: nothing to save the diagram into")]
    NoEditTarget,

    /// The entry being saved does not match the loaded edit target
    #[error("Edit target mismatch: editing {expected}, got {actual}")]
    TargetMismatch {
        /// The id of the loaded entry.
        expected: String,
        /// The id of the entry passed in.
        actual: String,
    },

    /// The scene could not be serialized
    #[error("Failed to serialize diagram: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The host store rejected the save
    #[error("Save failed: {source}")]
    Store {
        /// The error reported by the host.
        #[source]
        source: StoreError,
    },
}

impl BridgeError {
    /// Wraps a host store error.
    pub fn store(source: impl Into<StoreError>) -> Self {
        BridgeError::Store {
            source: source.into(),
        }
    }
}

/// Catalog error type
///
/// Represents errors related to reading and updating the exercise catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Unknown catalog bucket name
    #[error("Unknown catalog kind: {0}")]
    UnknownKind(String),

    /// Entry not found in the requested bucket
    #[error("Entry {id} not found in {kind}")]
    EntryNotFound {
        /// The entry id.
        id: String,
        /// The bucket that was searched.
        kind: String,
    },

    /// Catalog JSON could not be parsed or written
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main error type for Drillboard
#[derive(Error, Debug)]
pub enum Error {
    /// Bridge error
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// Catalog error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a bridge error
    pub fn is_bridge_error(&self) -> bool {
        matches!(self, Error::Bridge(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
