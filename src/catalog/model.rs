//! Deserializable representation of `catalog/protocols.json`.
//!
//! `CatalogDocument` and its children mirror the JSON schema one-to-one and are
//! only used while loading. Once a document passes validation its records are
//! turned into `ProtocolEntry` values, which carry their layer and cannot be
//! edited afterwards.

use crate::catalog::identity::{CatalogKey, Layer};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize)]
/// Full catalog document as stored on disk.
pub struct CatalogDocument {
    pub schema_version: String,
    pub catalog: CatalogMetadata,
    pub layers: Vec<LayerRecord>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
/// Title block shown above the selected layer.
pub struct CatalogMetadata {
    pub key: CatalogKey,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
/// One layer section and its entries in declaration order.
pub struct LayerRecord {
    pub id: Layer,
    pub name: String,
    pub entries: Vec<EntryRecord>,
}

#[derive(Clone, Debug, Deserialize)]
/// Raw protocol record before it is bound to a layer.
pub struct EntryRecord {
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub qualifier: Option<String>,
    pub description: String,
    pub usage: String,
    #[serde(default)]
    pub resource_link: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// A validated catalog entry.
pub struct ProtocolEntry {
    layer: Layer,
    name: String,
    full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    qualifier: Option<String>,
    description: String,
    usage: String,
    resource_link: Option<String>,
}

impl ProtocolEntry {
    pub(crate) fn from_record(layer: Layer, record: EntryRecord) -> Self {
        Self {
            layer,
            name: record.name,
            full_name: record.full_name.filter(|value| !value.trim().is_empty()),
            qualifier: record
                .qualifier
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            description: record.description,
            usage: record.usage,
            resource_link: record.resource_link.filter(|value| !value.trim().is_empty()),
        }
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Short name, unique within the entry's layer.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    /// Words that follow the expansion in the heading, e.g. `protocols`.
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Steps or example usage.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn resource_link(&self) -> Option<&str> {
        self.resource_link.as_deref()
    }

    /// Heading as shown to readers: `TCP (Transmission Control Protocol)`.
    pub fn heading(&self) -> String {
        let mut heading = match &self.full_name {
            Some(full) => format!("{} ({})", self.name, full),
            None => self.name.clone(),
        };
        if let Some(qualifier) = &self.qualifier {
            heading.push(' ');
            heading.push_str(qualifier);
        }
        heading
    }
}
