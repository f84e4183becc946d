//! Validated, indexed view of a protocol catalog document.
//!
//! Loading is strict: the document must pass the JSON schema, list the eight
//! layers in display order under their display names, and keep entry names
//! unique within each layer. Anything else is rejected before a
//! `ProtocolCatalog` exists, so queries against it cannot fail except on an
//! unknown selection.

use crate::catalog::model::{CatalogDocument, CatalogMetadata, LayerRecord, ProtocolEntry};
use crate::catalog::{CatalogKey, Layer};
use crate::error::{CatalogError, CatalogResult};
use crate::schema_loader::{CompiledSchema, SchemaLoadOptions, parse_json_schema};
use anyhow::{Context, Result, bail};
use log::{debug, info};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

const DEFAULT_SCHEMA_VERSION: &str = "protocol_catalog_v1";
const CATALOG_SCHEMA: &str = include_str!("../../schema/protocol_catalog.schema.json");
const BUILTIN_CATALOG: &str = include_str!("../../catalog/protocols.json");

static BUILTIN: OnceLock<ProtocolCatalog> = OnceLock::new();

#[derive(Clone, Debug)]
/// Catalog metadata plus entries grouped by layer, in declaration order.
pub struct ProtocolCatalog {
    metadata: CatalogMetadata,
    sections: Vec<Vec<ProtocolEntry>>,
}

impl ProtocolCatalog {
    /// The catalog compiled into the binary.
    ///
    /// Parsed and validated on first use; later calls return the same
    /// instance.
    pub fn builtin() -> Result<&'static ProtocolCatalog> {
        if let Some(catalog) = BUILTIN.get() {
            return Ok(catalog);
        }
        let catalog = Self::from_json_str(BUILTIN_CATALOG, "builtin catalog")?;
        Ok(BUILTIN.get_or_init(|| catalog))
    }

    /// Load and validate a catalog document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_json_str(&data, &path.display().to_string())
            .with_context(|| format!("loading catalog {}", path.display()))
    }

    /// Parse and validate a catalog document held in memory.
    pub fn from_json_str(data: &str, label: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(data).with_context(|| format!("parsing {label}"))?;

        let schema = catalog_schema()?;
        schema.validate(&value, label)?;

        let document: CatalogDocument =
            serde_json::from_value(value).with_context(|| format!("decoding {label}"))?;
        validate_catalog_metadata(&document.catalog)?;
        let sections = build_sections(document.layers)?;

        let catalog = Self {
            metadata: document.catalog,
            sections,
        };
        info!(
            "loaded protocol catalog {} ({} entries, schema {})",
            catalog.key().0,
            catalog.len(),
            schema.schema_version
        );
        Ok(catalog)
    }

    /// The catalog key declared in the loaded document.
    pub fn key(&self) -> &CatalogKey {
        &self.metadata.key
    }

    /// Title and summary shown above a rendered layer.
    pub fn metadata(&self) -> &CatalogMetadata {
        &self.metadata
    }

    /// Every layer in display order.
    pub fn list_layers(&self) -> &'static [Layer] {
        &Layer::ALL
    }

    /// Entries of an already-resolved layer.
    pub fn entries(&self, layer: Layer) -> &[ProtocolEntry] {
        self.sections
            .get(layer.position())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Resolve a selection string to a layer.
    pub fn resolve_layer(&self, selection: &str) -> CatalogResult<Layer> {
        Layer::from_selection(selection)
            .ok_or_else(|| CatalogError::UnknownLayer(selection.to_string()))
    }

    /// Entries for the selected layer, in declaration order.
    pub fn get_entries(&self, selection: &str) -> CatalogResult<&[ProtocolEntry]> {
        let layer = self.resolve_layer(selection)?;
        Ok(self.entries(layer))
    }

    /// Case-insensitive substring match on entry names and full names.
    ///
    /// Results follow catalog order. A blank term matches nothing.
    pub fn search(&self, term: &str) -> Vec<&ProtocolEntry> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let matches: Vec<&ProtocolEntry> = self
            .iter()
            .filter(|entry| {
                entry.name().to_lowercase().contains(&needle)
                    || entry
                        .full_name()
                        .map(|full| full.to_lowercase().contains(&needle))
                        .unwrap_or(false)
            })
            .collect();
        debug!("search '{}' matched {} entries", term.trim(), matches.len());
        matches
    }

    /// Every entry, layer by layer.
    pub fn iter(&self) -> impl Iterator<Item = &ProtocolEntry> {
        self.sections.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn catalog_schema() -> Result<CompiledSchema> {
    let allowed = allowed_schema_versions();
    parse_json_schema(
        CATALOG_SCHEMA,
        "schema/protocol_catalog.schema.json",
        SchemaLoadOptions {
            allowed_versions: Some(&allowed),
            ..Default::default()
        },
    )
}

fn allowed_schema_versions() -> BTreeSet<String> {
    BTreeSet::from_iter([DEFAULT_SCHEMA_VERSION.to_string()])
}

// The schema pins the key pattern and a non-empty title; blank titles still
// slip through as whitespace.
fn validate_catalog_metadata(meta: &CatalogMetadata) -> Result<()> {
    if meta.title.trim().is_empty() {
        bail!("catalog.title must not be empty");
    }
    Ok(())
}

// Layer count, non-empty sections and link schemes are already enforced by
// the schema.
fn build_sections(layers: Vec<LayerRecord>) -> Result<Vec<Vec<ProtocolEntry>>> {
    let mut sections = Vec::with_capacity(layers.len());
    for (expected, record) in Layer::ALL.iter().zip(layers) {
        if record.id != *expected {
            bail!(
                "layer '{}' out of order: expected '{}' at position {}",
                record.id.slug(),
                expected.slug(),
                expected.position() + 1
            );
        }
        if record.name != expected.name() {
            bail!(
                "layer '{}' must be named '{}', got '{}'",
                expected.slug(),
                expected.name(),
                record.name
            );
        }

        let mut seen: BTreeSet<String> = BTreeSet::new();
        let mut entries = Vec::with_capacity(record.entries.len());
        for entry in record.entries {
            let name = entry.name.as_str();
            if name.trim().is_empty() {
                bail!("layer '{}' contains an entry with no name", expected.slug());
            }
            if name.trim() != name {
                bail!("entry '{}' has surrounding whitespace in its name", name);
            }
            if let Some(full) = entry.full_name.as_deref() {
                if !full.trim().is_empty() && full.trim() != full {
                    bail!("entry '{}' has surrounding whitespace in its full name", name);
                }
            }
            if !seen.insert(name.to_string()) {
                bail!("duplicate entry '{}' in layer '{}'", name, expected.slug());
            }
            if entry.description.trim().is_empty() {
                bail!("entry '{}' has an empty description", name);
            }
            if entry.usage.trim().is_empty() {
                bail!("entry '{}' has empty usage notes", name);
            }
            if let Some(link) = entry.resource_link.as_deref().map(str::trim) {
                if !link.is_empty() && !is_http_link(link) {
                    bail!("entry '{}' has a non-http resource link: {}", name, link);
                }
            }
            entries.push(ProtocolEntry::from_record(*expected, entry));
        }
        debug!("layer {} indexed with {} entries", expected.slug(), entries.len());
        sections.push(entries);
    }
    Ok(sections)
}

fn is_http_link(link: &str) -> bool {
    let rest = link
        .strip_prefix("https://")
        .or_else(|| link.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty() && !host.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_loads_once() {
        let first = ProtocolCatalog::builtin().unwrap();
        let second = ProtocolCatalog::builtin().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.key().0, "osi_protocols_v1");
        assert_eq!(first.metadata().title, "Networking Protocols Explorer");
    }

    #[test]
    fn transport_layer_holds_tcp_udp_sctp() {
        let catalog = ProtocolCatalog::builtin().unwrap();
        let names: Vec<&str> = catalog
            .get_entries("Transport Layer Protocols")
            .unwrap()
            .iter()
            .map(ProtocolEntry::name)
            .collect();
        assert_eq!(names, vec!["TCP", "UDP", "SCTP"]);
    }

    #[test]
    fn unknown_selection_is_rejected() {
        let catalog = ProtocolCatalog::builtin().unwrap();
        assert_eq!(
            catalog.get_entries("NotALayer"),
            Err(CatalogError::UnknownLayer("NotALayer".to_string()))
        );
    }

    #[test]
    fn entries_carry_their_layer() {
        let catalog = ProtocolCatalog::builtin().unwrap();
        for layer in catalog.list_layers() {
            for entry in catalog.entries(*layer) {
                assert_eq!(entry.layer(), *layer);
            }
        }
    }

    #[test]
    fn search_matches_names_and_full_names() {
        let catalog = ProtocolCatalog::builtin().unwrap();
        let by_name: Vec<&str> = catalog.search("tcp").into_iter().map(|e| e.name()).collect();
        assert_eq!(by_name, vec!["TCP"]);

        let by_full: Vec<(Layer, &str)> = catalog
            .search("tunneling")
            .into_iter()
            .map(|e| (e.layer(), e.name()))
            .collect();
        assert_eq!(
            by_full,
            vec![(Layer::Other, "PPTP"), (Layer::Other, "L2TP")]
        );

        assert!(catalog.search("   ").is_empty());
        assert!(catalog.search("no-such-protocol").is_empty());
    }

    #[test]
    fn http_link_check() {
        assert!(is_http_link("https://www.rfc-editor.org/rfc/rfc9293"));
        assert!(is_http_link("http://example.org"));
        assert!(!is_http_link("ftp://example.org"));
        assert!(!is_http_link("https://"));
        assert!(!is_http_link("https:///path"));
    }
}
