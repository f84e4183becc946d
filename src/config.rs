//! Explorer configuration resolved from flags and environment.
//!
//! Precedence is flag, then environment variable, then built-in default.
//! Empty environment values are treated as unset.

use crate::catalog::ProtocolCatalog;
use crate::render::RenderFormat;
use anyhow::{Context, Result};
use log::{debug, warn};
use std::borrow::Cow;
use std::env;
use std::path::PathBuf;

/// Path to a catalog document that replaces the embedded one.
pub const CATALOG_ENV: &str = "PROTOCOL_EXPLORER_CATALOG";
/// Default output format when `--format` is not given.
pub const FORMAT_ENV: &str = "PROTOCOL_EXPLORER_FORMAT";

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CatalogSource {
    Builtin,
    File(PathBuf),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExplorerConfig {
    pub catalog: CatalogSource,
    pub format: RenderFormat,
}

/// Values supplied on the command line, if any.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub catalog: Option<PathBuf>,
    pub format: Option<RenderFormat>,
}

impl ExplorerConfig {
    /// Resolve against the process environment.
    pub fn resolve(overrides: ConfigOverrides) -> Self {
        Self::resolve_with(overrides, |key| env::var(key).ok())
    }

    /// Resolve using `lookup` in place of the process environment.
    pub fn resolve_with(
        overrides: ConfigOverrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let env_value = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let catalog = match overrides.catalog {
            Some(path) => CatalogSource::File(path),
            None => match env_value(CATALOG_ENV) {
                Some(path) => {
                    debug!("{CATALOG_ENV} selects catalog {path}");
                    CatalogSource::File(PathBuf::from(path))
                }
                None => CatalogSource::Builtin,
            },
        };

        let format = match overrides.format {
            Some(format) => format,
            None => match env_value(FORMAT_ENV) {
                Some(raw) => match RenderFormat::parse(&raw) {
                    Ok(format) => format,
                    Err(err) => {
                        warn!("ignoring {FORMAT_ENV}: {err}");
                        RenderFormat::Text
                    }
                },
                None => RenderFormat::Text,
            },
        };

        Self { catalog, format }
    }

    /// Load the configured catalog.
    ///
    /// The embedded catalog is shared; a file-backed one is owned by the
    /// caller.
    pub fn load_catalog(&self) -> Result<Cow<'static, ProtocolCatalog>> {
        match &self.catalog {
            CatalogSource::Builtin => Ok(Cow::Borrowed(ProtocolCatalog::builtin()?)),
            CatalogSource::File(path) => ProtocolCatalog::load(path)
                .map(Cow::Owned)
                .with_context(|| format!("using catalog from {}", path.display())),
        }
    }
}
