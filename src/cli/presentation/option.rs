//! Option presentation: a resolved value and where it came from.

use super::shared::{display_source, display_value};
use crate::context::{OptionValue, Resolution};
use crate::error::ApiError;
use serde_json::json;

fn origin(resolution: &Resolution<'_>) -> String {
    let kind = if resolution.command_specific {
        " [command-specific]"
    } else {
        ""
    };
    format!(
        "{} (rank {}){}: {}",
        resolution.context,
        resolution.rank,
        kind,
        display_source(resolution.source_path)
    )
}

/// `name = value  <- origin`, or the default when nothing matched.
pub fn format_option_text(name: &str, winner: Option<&Resolution<'_>>, default: &OptionValue) -> String {
    match winner {
        Some(r) => format!("{} = {}  <- {}", name, display_value(r.value), origin(r)),
        None => format!("{} = {}  <- default", name, display_value(default)),
    }
}

/// Every context's value, winner first.
pub fn format_option_all_text(name: &str, values: &[Resolution<'_>]) -> String {
    if values.is_empty() {
        return format!("{} is not set in any context.", name);
    }
    values
        .iter()
        .map(|r| format!("{} = {}  <- {}", name, display_value(r.value), origin(r)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_option_json(
    name: &str,
    command: &str,
    winner: Option<&Resolution<'_>>,
    default: &OptionValue,
    all: Option<&[Resolution<'_>]>,
) -> Result<String, ApiError> {
    let mut out = json!({
        "name": name,
        "command": command,
        "value": winner.map(|r| r.value).unwrap_or(default),
        "source": winner,
    });
    if let Some(all) = all {
        out["contexts"] = serde_json::to_value(all)?;
    }
    Ok(serde_json::to_string_pretty(&out)?)
}
