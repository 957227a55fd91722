//! Error types for the brush context resolution engine.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while discovering, loading or resolving contexts.
///
/// Every variant is fatal to the invocation: no command runs against a
/// partially built context stack.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Failed to read configuration source {}: {source}", .path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}", format_parse_error(.path, .line, .message))]
    Parse {
        path: PathBuf,
        line: Option<usize>,
        message: String,
    },

    #[error("No such alias: @{name} (searched {})", format_searched(.searched))]
    UnknownAlias { name: String, searched: Vec<PathBuf> },

    #[error("Invalid option override: {0}")]
    InvalidOverride(String),
}

impl ContextError {
    pub(crate) fn parse(
        path: &std::path::Path,
        line: Option<usize>,
        message: impl Into<String>,
    ) -> Self {
        ContextError::Parse {
            path: path.to_path_buf(),
            line,
            message: message.into(),
        }
    }

    pub(crate) fn discovery(path: &std::path::Path, source: std::io::Error) -> Self {
        ContextError::Discovery {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn format_parse_error(path: &std::path::Path, line: &Option<usize>, message: &str) -> String {
    match line {
        Some(line) => format!(
            "Failed to parse {} (line {}): {}",
            path.display(),
            line,
            message
        ),
        None => format!("Failed to parse {}: {}", path.display(), message),
    }
}

fn format_searched(searched: &[PathBuf]) -> String {
    if searched.is_empty() {
        return "no alias directories".to_string();
    }
    searched
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// CLI-facing errors: context failures plus the surface around them.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Output error: {0}")]
    OutputError(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::OutputError(err.to_string())
    }
}
