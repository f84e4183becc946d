#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::NamedTempFile;

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn explorer_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_protocol-explorer"))
}

/// Command for the explorer with catalog/format environment overrides cleared.
pub fn explorer_command() -> Command {
    let mut cmd = Command::new(explorer_binary());
    cmd.env_remove("PROTOCOL_EXPLORER_CATALOG")
        .env_remove("PROTOCOL_EXPLORER_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// The shipped catalog document as raw JSON, for building mutated fixtures.
pub fn builtin_document() -> Value {
    let path = repo_root().join("catalog/protocols.json");
    let data = fs::read_to_string(&path).expect("catalog/protocols.json readable");
    serde_json::from_str(&data).expect("catalog/protocols.json is JSON")
}

pub fn write_catalog(value: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("failed to allocate catalog file")?;
    serde_json::to_writer_pretty(&mut file, value)?;
    file.flush()?;
    Ok(file)
}

pub fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
