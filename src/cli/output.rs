//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, ContextError};

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Context(ContextError::UnknownAlias { .. }) => format!(
            "{}\nDefine it in an aliases.brushrc.toml file or pass --alias-path.",
            e
        ),
        _ => e.to_string(),
    }
}
