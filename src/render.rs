//! Turns catalog selections into display blocks and writes them out.
//!
//! The block types are UI-agnostic: a front-end can consume `LayerView`
//! directly or hand it to one of the writers here (`text`, `markdown`,
//! `json`). Rendering never reorders entries.

use crate::catalog::{CatalogMetadata, Layer, ProtocolCatalog, ProtocolEntry};
use crate::error::CatalogResult;
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::fmt;

const LINK_LABEL: &str = "Documentation";

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DisplayLink {
    pub label: String,
    pub url: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// Rendered form of one protocol entry.
pub struct DisplayBlock {
    pub layer: Layer,
    pub name: String,
    pub heading: String,
    pub description: String,
    pub usage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<DisplayLink>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// One layer section ready for presentation.
pub struct LayerView {
    pub layer: Layer,
    pub title: String,
    pub blocks: Vec<DisplayBlock>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RenderFormat {
    Text,
    Markdown,
    Json,
}

impl RenderFormat {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => bail!("unknown format '{other}' (expected text|markdown|json)"),
        }
    }
}

impl DisplayBlock {
    pub fn from_entry(entry: &ProtocolEntry) -> Self {
        Self {
            layer: entry.layer(),
            name: entry.name().to_string(),
            heading: entry.heading(),
            description: entry.description().to_string(),
            usage: entry.usage().to_string(),
            link: entry.resource_link().map(|url| DisplayLink {
                label: LINK_LABEL.to_string(),
                url: url.to_string(),
            }),
        }
    }
}

/// One block per entry, in input order.
pub fn render_blocks(entries: &[ProtocolEntry]) -> Vec<DisplayBlock> {
    entries.iter().map(DisplayBlock::from_entry).collect()
}

/// Render the layer named by `selection`.
pub fn render_layer(catalog: &ProtocolCatalog, selection: &str) -> CatalogResult<LayerView> {
    let layer = catalog.resolve_layer(selection)?;
    Ok(layer_view(layer, catalog.entries(layer)))
}

/// Render every layer in display order.
pub fn render_all(catalog: &ProtocolCatalog) -> Vec<LayerView> {
    catalog
        .list_layers()
        .iter()
        .map(|layer| layer_view(*layer, catalog.entries(*layer)))
        .collect()
}

/// Render search matches, grouped under the layer each match belongs to.
///
/// Layers without matches are left out.
pub fn render_search(catalog: &ProtocolCatalog, term: &str) -> Vec<LayerView> {
    let mut views: Vec<LayerView> = Vec::new();
    for entry in catalog.search(term) {
        let block = DisplayBlock::from_entry(entry);
        match views.last_mut() {
            Some(view) if view.layer == entry.layer() => view.blocks.push(block),
            _ => views.push(LayerView {
                layer: entry.layer(),
                title: entry.layer().name().to_string(),
                blocks: vec![block],
            }),
        }
    }
    views
}

fn layer_view(layer: Layer, entries: &[ProtocolEntry]) -> LayerView {
    LayerView {
        layer,
        title: layer.name().to_string(),
        blocks: render_blocks(entries),
    }
}

#[derive(Serialize)]
struct JsonPage<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    catalog: Option<&'a CatalogMetadata>,
    layers: &'a [LayerView],
}

/// Write a page of views in the requested format.
///
/// `header` adds the catalog title and summary on top.
pub fn write_page<W: fmt::Write>(
    writer: &mut W,
    header: Option<&CatalogMetadata>,
    views: &[LayerView],
    format: RenderFormat,
) -> Result<()> {
    match format {
        RenderFormat::Text => write_text(writer, header, views).context("writing text output"),
        RenderFormat::Markdown => {
            write_markdown(writer, header, views).context("writing markdown output")
        }
        RenderFormat::Json => {
            let page = JsonPage {
                catalog: header,
                layers: views,
            };
            let json = serde_json::to_string_pretty(&page).context("serializing layer views")?;
            writeln!(writer, "{json}").context("writing json output")
        }
    }
}

fn write_text(
    writer: &mut impl fmt::Write,
    header: Option<&CatalogMetadata>,
    views: &[LayerView],
) -> fmt::Result {
    if let Some(meta) = header {
        writeln!(writer, "{}", meta.title)?;
        writeln!(writer, "{}", "=".repeat(meta.title.chars().count()))?;
        if let Some(summary) = meta.summary.as_deref() {
            writeln!(writer, "{}", summary.trim())?;
        }
        writeln!(writer)?;
    }

    for view in views {
        writeln!(writer, "{}", view.title)?;
        writeln!(writer, "{}", "-".repeat(view.title.chars().count()))?;
        for block in &view.blocks {
            writeln!(writer, "{}", block.heading)?;
            writeln!(writer, "  description: {}", block.description)?;
            writeln!(writer, "  usage:       {}", block.usage)?;
            if let Some(link) = &block.link {
                writeln!(writer, "  resource:    {}", link.url)?;
            }
            writeln!(writer)?;
        }
    }
    Ok(())
}

fn write_markdown(
    writer: &mut impl fmt::Write,
    header: Option<&CatalogMetadata>,
    views: &[LayerView],
) -> fmt::Result {
    if let Some(meta) = header {
        writeln!(writer, "# {}", meta.title)?;
        writeln!(writer)?;
        if let Some(summary) = meta.summary.as_deref() {
            writeln!(writer, "{}", summary.trim())?;
            writeln!(writer)?;
        }
    }

    for view in views {
        writeln!(writer, "## {}", view.title)?;
        writeln!(writer)?;
        for block in &view.blocks {
            writeln!(writer, "### {}", block.heading)?;
            writeln!(writer)?;
            writeln!(writer, "**Description:** {}", block.description)?;
            writeln!(writer)?;
            writeln!(writer, "**Steps/Examples:** {}", block.usage)?;
            writeln!(writer)?;
            if let Some(link) = &block.link {
                writeln!(writer, "**Resource:** [{}]({})", link.label, link.url)?;
                writeln!(writer)?;
            }
            writeln!(writer, "---")?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
