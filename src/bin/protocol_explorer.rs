//! Command-line front-end for the protocol catalog.
//!
//! Plays the role of the layer picker: one selection in, rendered entries out.
//! Without a selection it shows the first layer, the same default a sidebar
//! picker starts on. Output goes to stdout as text, markdown, or JSON.

use anyhow::{Result, anyhow, bail};
use log::debug;
use protocol_explorer::{
    ConfigOverrides, ExplorerConfig, LayerView, ProtocolCatalog, RenderFormat, render_all,
    render_layer, render_search, write_page,
};
use serde_json::json;
use std::env;
use std::ffi::OsString;
use std::fmt::Write;
use std::path::PathBuf;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse(env::args_os().skip(1))?;
    let config = ExplorerConfig::resolve(args.overrides);
    debug!("resolved config: {:?}", config);
    let catalog = config.load_catalog()?;

    let output = match args.mode {
        Mode::ListLayers => render_layer_list(&catalog, config.format)?,
        Mode::Search(term) => {
            let views = render_search(&catalog, &term);
            if views.is_empty() && config.format != RenderFormat::Json {
                format!("no protocols match '{}'\n", term.trim())
            } else {
                render_views(&catalog, &views, config.format, false)?
            }
        }
        Mode::All => render_views(&catalog, &render_all(&catalog), config.format, args.header)?,
        Mode::Layer(selection) => {
            let selection = match selection {
                Some(selection) => selection,
                None => catalog
                    .list_layers()
                    .first()
                    .map(|layer| layer.name().to_string())
                    .ok_or_else(|| anyhow!("catalog has no layers"))?,
            };
            let view = render_layer(&catalog, selection.trim())?;
            render_views(&catalog, &[view], config.format, args.header)?
        }
    };

    print!("{output}");
    Ok(())
}

fn render_views(
    catalog: &ProtocolCatalog,
    views: &[LayerView],
    format: RenderFormat,
    header: bool,
) -> Result<String> {
    let mut output = String::new();
    let header = header.then(|| catalog.metadata());
    write_page(&mut output, header, views, format)?;
    Ok(output)
}

fn render_layer_list(catalog: &ProtocolCatalog, format: RenderFormat) -> Result<String> {
    let mut output = String::new();
    match format {
        RenderFormat::Json => {
            let layers: Vec<_> = catalog
                .list_layers()
                .iter()
                .map(|layer| {
                    json!({
                        "id": layer.slug(),
                        "name": layer.name(),
                        "entries": catalog.entries(*layer).len(),
                    })
                })
                .collect();
            writeln!(output, "{}", serde_json::to_string_pretty(&layers)?)?;
        }
        RenderFormat::Markdown => {
            for layer in catalog.list_layers() {
                writeln!(
                    output,
                    "- **{}** (`{}`, {} entries)",
                    layer.name(),
                    layer.slug(),
                    catalog.entries(*layer).len()
                )?;
            }
        }
        RenderFormat::Text => {
            for layer in catalog.list_layers() {
                writeln!(
                    output,
                    "{:<13} {} ({} entries)",
                    layer.slug(),
                    layer.name(),
                    catalog.entries(*layer).len()
                )?;
            }
        }
    }
    Ok(output)
}

#[derive(Debug, Eq, PartialEq)]
enum Mode {
    Layer(Option<String>),
    All,
    ListLayers,
    Search(String),
}

struct CliArgs {
    mode: Mode,
    header: bool,
    overrides: ConfigOverrides,
}

impl CliArgs {
    fn parse(args: impl IntoIterator<Item = OsString>) -> Result<Self> {
        let mut args = args.into_iter();
        let mut mode: Option<Mode> = None;
        let mut header = true;
        let mut overrides = ConfigOverrides::default();

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow!("argument is not valid UTF-8"))?;
            let next_mode = match arg.as_str() {
                "--layer" | "-l" => Some(Mode::Layer(Some(next_value(&mut args, "--layer")?))),
                "--all" => Some(Mode::All),
                "--list-layers" => Some(Mode::ListLayers),
                "--search" | "-s" => Some(Mode::Search(next_value(&mut args, "--search")?)),
                "--format" | "-f" => {
                    let raw = next_value(&mut args, "--format")?;
                    overrides.format = Some(RenderFormat::parse(&raw)?);
                    None
                }
                "--catalog" => {
                    let path = next_value(&mut args, "--catalog")?;
                    if path.trim().is_empty() {
                        bail!("--catalog requires a non-empty path");
                    }
                    overrides.catalog = Some(PathBuf::from(path));
                    None
                }
                "--no-header" => {
                    header = false;
                    None
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}\n{}", usage()),
            };

            if let Some(next_mode) = next_mode {
                if mode.is_some() {
                    bail!("--layer, --all, --list-layers, and --search are mutually exclusive");
                }
                mode = Some(next_mode);
            }
        }

        Ok(CliArgs {
            mode: mode.unwrap_or(Mode::Layer(None)),
            header,
            overrides,
        })
    }
}

fn next_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: protocol-explorer [--layer LAYER | --all | --list-layers | --search TERM] [--format text|markdown|json] [--catalog PATH] [--no-header]\n\
LAYER is a display name (\"Transport Layer Protocols\") or slug (transport); surrounding spaces are ignored. Defaults to the first layer.\n\
Environment: PROTOCOL_EXPLORER_CATALOG (catalog path), PROTOCOL_EXPLORER_FORMAT (default format), RUST_LOG (log filter).\n"
}

fn print_usage() {
    print!("{}", usage());
}
