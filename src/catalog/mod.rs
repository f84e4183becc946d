//! Protocol catalog wiring.
//!
//! This module wraps the JSON catalog under `catalog/protocols.json` so
//! callers get a validated, read-only snapshot. Types in `model` mirror the
//! document; `ProtocolCatalog` answers the layer and search queries.

pub mod identity;
pub mod index;
pub mod model;

pub use identity::{CatalogKey, Layer};
pub use index::ProtocolCatalog;
pub use model::{CatalogDocument, CatalogMetadata, ProtocolEntry};
