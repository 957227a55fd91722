//! Filesystem roots the search paths hang off: home, system directory, and
//! the tool identity used for version gating.

use crate::config::version_gate::VersionGate;
use std::path::PathBuf;

/// Tool name used in file names and version tokens.
pub const TOOL_NAME: &str = "brush";

/// Environment variable that relocates the system configuration directory.
pub const SYSTEM_DIR_ENV: &str = "BRUSH_SYSTEM_CONFIG_DIR";

const DEFAULT_SYSTEM_DIR: &str = "/etc/brush";

/// Major version of this build.
pub fn tool_major_version() -> u32 {
    env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0)
}

/// Where the user and system slots live, and which tool generation is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRoots {
    /// Invoking user's home directory. `None` disables the user and home.brush slots.
    pub home: Option<PathBuf>,
    pub system_dir: PathBuf,
    pub tool_name: String,
    pub major_version: u32,
}

impl SearchRoots {
    /// Roots for the current process: home from the platform, system directory
    /// from `BRUSH_SYSTEM_CONFIG_DIR` or `/etc/brush`.
    pub fn from_env() -> Self {
        let home = directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
        let system_dir = std::env::var_os(SYSTEM_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SYSTEM_DIR));
        Self {
            home,
            system_dir,
            tool_name: TOOL_NAME.to_string(),
            major_version: tool_major_version(),
        }
    }

    /// Explicit roots, mostly for tests and embedding.
    pub fn new(home: Option<PathBuf>, system_dir: impl Into<PathBuf>, major_version: u32) -> Self {
        Self {
            home,
            system_dir: system_dir.into(),
            tool_name: TOOL_NAME.to_string(),
            major_version,
        }
    }

    /// Dotfolder under home: `~/.brush`. Also the user alias directory.
    pub fn home_tool_dir(&self) -> Option<PathBuf> {
        self.home
            .as_ref()
            .map(|home| home.join(format!(".{}", self.tool_name)))
    }

    /// Plain rc file name, e.g. `brushrc.toml`.
    pub fn rc_file_name(&self) -> String {
        format!("{}rc.toml", self.tool_name)
    }

    /// Dotted rc file name used directly in the home directory, e.g. `.brushrc.toml`.
    pub fn user_rc_file_name(&self) -> String {
        format!(".{}", self.rc_file_name())
    }

    pub fn version_gate(&self) -> VersionGate {
        VersionGate::new(self.tool_name.clone(), self.major_version)
    }
}
