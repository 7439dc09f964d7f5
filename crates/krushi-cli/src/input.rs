//! Action input for `krushi call`.
//!
//! The payload comes from `--input`/`-i` (inline JSON), or from
//! `--input-file`/`-f` (a path, or `-` for stdin), which wins when given.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde_json::Value;

/// Resolves and parses the action payload.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the text is not JSON.
pub fn resolve_input(inline: &str, input_file: Option<&str>) -> anyhow::Result<Value> {
    let (text, origin) = match input_file {
        Some("-") => (read_stdin()?, "stdin".to_string()),
        Some(path) => (read_file(Path::new(path))?, path.to_string()),
        None => (inline.to_string(), "--input".to_string()),
    };
    parse_payload(&text).with_context(|| format!("invalid JSON input from {origin}"))
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    if !path.exists() {
        anyhow::bail!("input file not found: {}", path.display());
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read stdin")?;
    Ok(buffer)
}

/// Empty text means an empty object, so `-f` with an empty file works.
fn parse_payload(text: &str) -> Result<Value, serde_json::Error> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_str(trimmed)
}
