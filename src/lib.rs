//! Shared library for the protocol explorer.
//!
//! The crate exposes the protocol catalog (layers, entries, lookups) and the
//! renderer that turns a layer selection into display blocks. Public
//! functions here form the contract the `protocol-explorer` binary depends
//! on: load a validated catalog once, pass the current selection in, get
//! ordered blocks out. Nothing is mutated after load and nothing touches the
//! network.

pub mod catalog;
pub mod config;
pub mod error;
pub mod render;
mod schema_loader;

pub use catalog::{
    CatalogDocument, CatalogKey, CatalogMetadata, Layer, ProtocolCatalog, ProtocolEntry,
};
pub use config::{CatalogSource, ConfigOverrides, ExplorerConfig};
pub use error::{CatalogError, CatalogResult};
pub use render::{
    DisplayBlock, DisplayLink, LayerView, RenderFormat, render_all, render_blocks, render_layer,
    render_search, write_page,
};

