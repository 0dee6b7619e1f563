//! Host-side data records shared with the editor.

pub mod catalog;

pub use catalog::{Catalog, CatalogEntry, CatalogKind};
