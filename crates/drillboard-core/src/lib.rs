//! # Drillboard Core
//!
//! Core types and utilities for Drillboard.
//! Provides the error types, shared editor constants, and the catalog
//! records the diagram editor is attached to.

pub mod constants;
pub mod data;
pub mod error;

pub use data::{Catalog, CatalogEntry, CatalogKind};

pub use error::{BridgeError, CatalogError, Error, Result, StoreError};
