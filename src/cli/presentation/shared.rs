//! Shared presentation helpers.

use crate::context::OptionValue;
use std::path::Path;

/// Strings print bare; everything else in TOML notation.
pub fn display_value(value: &OptionValue) -> String {
    match value {
        OptionValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn display_source(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string())
}
