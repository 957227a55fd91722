//! Status presentation: which sources fed the stack.

use crate::context::{ContextSlot, ContextStack, SkippedSource};
use crate::error::ApiError;
use serde::Serialize;
use std::path::PathBuf;

/// Snapshot of discovery results for `brush status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub config_files: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_file: Option<PathBuf>,
    pub skipped: Vec<SkippedSource>,
}

impl StatusReport {
    pub fn from_stack(stack: &ContextStack, root: Option<PathBuf>, site: Option<PathBuf>) -> Self {
        let log = stack.load_log();
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            root,
            site,
            alias: stack
                .context(ContextSlot::Alias)
                .map(|ctx| format!("@{}", ctx.name())),
            config_files: log.config_paths().iter().map(|p| p.to_path_buf()).collect(),
            alias_file: log.alias_path().map(|p| p.to_path_buf()),
            skipped: log.skipped().to_vec(),
        }
    }
}

/// Loaded config files on one line, space separated.
pub fn format_status_pipe(report: &StatusReport) -> String {
    report
        .config_files
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_status_text(report: &StatusReport) -> String {
    let mut lines = vec![format!(" {:<21}:  {}", "Brush version", report.version)];
    if let Some(root) = &report.root {
        lines.push(format!(" {:<21}:  {}", "Backdrop root", root.display()));
    }
    if let Some(site) = &report.site {
        lines.push(format!(" {:<21}:  {}", "Site path", site.display()));
    }
    if let Some(alias) = &report.alias {
        lines.push(format!(" {:<21}:  {}", "Alias", alias));
    }
    lines.push(format!(
        " {:<21}:  {}",
        "Brush configuration",
        format_status_pipe(report)
    ));
    if let Some(alias_file) = &report.alias_file {
        lines.push(format!(" {:<21}:  {}", "Alias file", alias_file.display()));
    }
    for skipped in &report.skipped {
        lines.push(format!(
            " {:<21}:  {} ({})",
            "Skipped",
            skipped.path.display(),
            skipped.reason
        ));
    }
    lines.join("\n")
}

pub fn format_status_json(report: &StatusReport) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(report)?)
}
