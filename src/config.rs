//! Configuration sources
//!
//! Where configuration lives on disk and how it is read: the search roots,
//! per-slot search paths with version gating, and the rc and alias file
//! formats. Turning sources into contexts is the job of [`crate::context`].

pub mod paths;
pub mod search;
pub mod version_gate;

/// File formats: rc files and alias files.
pub mod sources {
    pub mod alias_file;
    pub mod rc_file;
}

pub use paths::{tool_major_version, SearchRoots, SYSTEM_DIR_ENV, TOOL_NAME};
pub use search::{Candidate, CandidateKind, SearchPlan, SlotProbe};
pub use sources::alias_file::{AliasRecord, METADATA_KEYS};
pub use sources::rc_file::{load_rc_file, parse_rc};
pub use version_gate::{Eligibility, VersionGate};
