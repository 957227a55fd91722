//! rc file source: `brushrc.toml` and its version-specific variants.
//!
//! The format is line oriented with TOML value syntax:
//!
//! ```text
//! # generic options
//! contextConfig = "site"
//! verbose = true
//!
//! [command-specific.unit-eval]
//! contextConfig = "site-specific"
//!
//! [options]
//! # back in the generic bucket
//! ```
//!
//! Each assignment stands alone, so a key repeated within one file keeps its
//! last value. Nothing in the file is ever executed.

use crate::context::types::{ContextContribution, OptionValue};
use crate::error::ContextError;
use std::path::Path;

const GENERIC_SECTION: &str = "options";
const COMMAND_SECTION_PREFIX: &str = "command-specific.";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Section {
    Generic,
    Command(String),
}

/// Read and parse one rc file.
pub fn load_rc_file(path: &Path) -> Result<ContextContribution, ContextError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ContextError::discovery(path, e))?;
    parse_rc(&contents, path)
}

/// Parse rc file contents. `path` is only used for error reporting.
pub fn parse_rc(contents: &str, path: &Path) -> Result<ContextContribution, ContextError> {
    let mut contribution = ContextContribution::default();
    let mut section = Section::Generic;

    for (idx, raw) in contents.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section =
                parse_header(line).map_err(|msg| ContextError::parse(path, Some(line_no), msg))?;
            continue;
        }

        let (key, value) =
            parse_assignment(line).map_err(|msg| ContextError::parse(path, Some(line_no), msg))?;
        match &section {
            Section::Generic => contribution.set(key, value),
            Section::Command(command) => contribution.set_for_command(command.clone(), key, value),
        }
    }

    Ok(contribution)
}

fn parse_header(line: &str) -> Result<Section, String> {
    let line = strip_trailing_comment(line);
    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .map(str::trim)
        .filter(|inner| !inner.starts_with('['))
        .ok_or_else(|| format!("malformed section header `{}`", line))?;

    if inner == GENERIC_SECTION {
        return Ok(Section::Generic);
    }
    if let Some(command) = inner.strip_prefix(COMMAND_SECTION_PREFIX) {
        let command = unquote(command.trim());
        if command.is_empty() {
            return Err("command-specific section needs a command name".to_string());
        }
        return Ok(Section::Command(command.to_string()));
    }
    Err(format!(
        "unknown section `[{}]` (expected `[{}]` or `[{}<command>]`)",
        inner, GENERIC_SECTION, COMMAND_SECTION_PREFIX
    ))
}

/// Parse `key = value`. The key is taken literally (dots included); the value
/// uses TOML syntax.
pub(crate) fn parse_assignment(line: &str) -> Result<(String, OptionValue), String> {
    let (key, raw_value) = line
        .split_once('=')
        .ok_or_else(|| format!("expected `key = value`, found `{}`", line))?;
    let key = parse_key(key)?;
    let value = parse_value(raw_value.trim())?;
    Ok((key, value))
}

pub(crate) fn parse_key(raw: &str) -> Result<String, String> {
    let key = unquote(raw.trim());
    if key.is_empty() {
        return Err("option name is empty".to_string());
    }
    let valid = key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'));
    if !valid {
        return Err(format!("invalid option name `{}`", key));
    }
    Ok(key.to_string())
}

/// Parse a single TOML value (`"text"`, `3`, `true`, `["a", "b"]`, ...).
pub(crate) fn parse_value(raw: &str) -> Result<OptionValue, String> {
    if raw.is_empty() {
        return Err("missing value after `=`".to_string());
    }
    let document = format!("value = {}", raw);
    let mut table: toml::Table =
        toml::from_str(&document).map_err(|e| format!("invalid value `{}`: {}", raw, e.message()))?;
    table
        .remove("value")
        .ok_or_else(|| format!("invalid value `{}`", raw))
}

/// Cut a `#` comment that starts outside double quotes.
fn strip_trailing_comment(line: &str) -> &str {
    let mut quoted = false;
    for (idx, c) in line.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '#' if !quoted => return line[..idx].trim_end(),
            _ => {}
        }
    }
    line
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(s)
}
