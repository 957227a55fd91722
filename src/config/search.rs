//! Search path enumeration: which file, if any, feeds each file-backed slot.
//!
//! Per slot the candidates are the plain rc file first, then (for gated
//! slots) version-specific files and directories found in the slot
//! directory. The plain file is used when it exists, and the first existing
//! version-specific candidate is layered on top of it. Both feed the same
//! context.

use crate::config::paths::SearchRoots;
use crate::config::version_gate::{Eligibility, VersionGate};
use crate::context::diagnostics::SkippedSource;
use crate::context::types::ContextSlot;
use crate::error::ContextError;
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// How a candidate was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    /// The slot's plain rc file, or the explicit `--config` file.
    Plain,
    /// `<tool><major>rc.toml` next to the plain file.
    VersionFile,
    /// `<tool><major>/brushrc.toml` below the slot directory.
    VersionDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub kind: CandidateKind,
}

/// Enumeration result for one slot.
#[derive(Debug, Clone, Default)]
pub struct SlotProbe {
    pub candidates: Vec<Candidate>,
    /// Files feeding the slot, in load order: the plain file, then at most
    /// one version-specific file whose values override it.
    pub selected: Vec<PathBuf>,
    /// Version-gated names rejected while scanning.
    pub skipped: Vec<SkippedSource>,
}

/// Slot directories for one invocation.
#[derive(Debug, Clone)]
pub struct SearchPlan {
    roots: SearchRoots,
    custom: Option<PathBuf>,
    site_dir: Option<PathBuf>,
    backdrop_root: Option<PathBuf>,
    gated: BTreeSet<ContextSlot>,
}

impl SearchPlan {
    /// Plan with only the system slot version gated.
    pub fn new(roots: SearchRoots) -> Self {
        Self {
            roots,
            custom: None,
            site_dir: None,
            backdrop_root: None,
            gated: BTreeSet::from([ContextSlot::System]),
        }
    }

    /// Explicit `--config` path: a file, or a directory holding `brushrc.toml`.
    pub fn with_custom(mut self, path: Option<PathBuf>) -> Self {
        self.custom = path;
        self
    }

    pub fn with_site_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.site_dir = dir;
        self
    }

    pub fn with_backdrop_root(mut self, dir: Option<PathBuf>) -> Self {
        self.backdrop_root = dir;
        self
    }

    /// Turn on version gating for another slot.
    pub fn gate_slot(mut self, slot: ContextSlot) -> Self {
        self.gated.insert(slot);
        self
    }

    pub fn roots(&self) -> &SearchRoots {
        &self.roots
    }

    pub fn site_dir(&self) -> Option<&Path> {
        self.site_dir.as_deref()
    }

    pub fn is_gated(&self, slot: ContextSlot) -> bool {
        self.gated.contains(&slot)
    }

    /// Directory and plain file name probed for `slot`. `None` when the slot
    /// has no location in this invocation (no root, no home, synthetic slot).
    pub fn slot_location(&self, slot: ContextSlot) -> Option<(PathBuf, String)> {
        let plain = self.roots.rc_file_name();
        match slot {
            ContextSlot::Custom => {
                let custom = self.custom.as_ref()?;
                if custom.is_dir() {
                    Some((custom.clone(), plain))
                } else {
                    let dir = custom.parent().map(Path::to_path_buf).unwrap_or_default();
                    let name = custom.file_name()?.to_string_lossy().into_owned();
                    Some((dir, name))
                }
            }
            ContextSlot::Site => self.site_dir.clone().map(|dir| (dir, plain)),
            ContextSlot::BackdropRoot => self.backdrop_root.clone().map(|dir| (dir, plain)),
            ContextSlot::User => self
                .roots
                .home
                .clone()
                .map(|dir| (dir, self.roots.user_rc_file_name())),
            ContextSlot::HomeBrush => self.roots.home_tool_dir().map(|dir| (dir, plain)),
            ContextSlot::System => Some((self.roots.system_dir.clone(), plain)),
            ContextSlot::Process | ContextSlot::Alias | ContextSlot::CoreDefault => None,
        }
    }

    /// Enumerate candidates for `slot` and pick the files it loads.
    pub fn probe(&self, slot: ContextSlot) -> Result<SlotProbe, ContextError> {
        let Some((dir, file_name)) = self.slot_location(slot) else {
            return Ok(SlotProbe::default());
        };

        let mut probe = SlotProbe::default();
        probe.candidates.push(Candidate {
            path: dir.join(&file_name),
            kind: CandidateKind::Plain,
        });
        if self.is_gated(slot) {
            let gate = self.roots.version_gate();
            scan_versioned(&dir, &gate, &self.roots.rc_file_name(), slot, &mut probe)?;
        }

        let mut versioned_found = false;
        for candidate in &probe.candidates {
            if versioned_found && candidate.kind != CandidateKind::Plain {
                continue;
            }
            debug!(slot = %slot, path = %candidate.path.display(), "Probing config candidate");
            if is_existing_file(&candidate.path)? {
                versioned_found |= candidate.kind != CandidateKind::Plain;
                probe.selected.push(candidate.path.clone());
            }
        }

        if probe.selected.is_empty() && slot == ContextSlot::Custom {
            warn!(
                path = %dir.join(&file_name).display(),
                "Explicit config path does not exist; custom context left empty"
            );
        }
        Ok(probe)
    }
}

/// Collect version-specific candidates from `dir`, file variants before
/// directory variants, each in name order. Mismatched tokens are recorded as
/// skipped and never become candidates.
fn scan_versioned(
    dir: &Path,
    gate: &VersionGate,
    plain_name: &str,
    slot: ContextSlot,
    probe: &mut SlotProbe,
) -> Result<(), ContextError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(ContextError::discovery(dir, e)),
    };

    let mut names: Vec<(String, bool)> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ContextError::discovery(dir, e))?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        let is_dir = entry.path().is_dir();
        names.push((name, is_dir));
    }
    names.sort();

    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for (name, is_dir) in names {
        let path = dir.join(&name);
        let eligibility = if is_dir {
            gate.classify_dir(&name)
        } else if name.ends_with("rc.toml") {
            gate.classify_file(&name)
        } else {
            Eligibility::Unversioned
        };
        match eligibility {
            Eligibility::Unversioned => {}
            Eligibility::Matching if is_dir => dirs.push(Candidate {
                path: path.join(plain_name),
                kind: CandidateKind::VersionDir,
            }),
            Eligibility::Matching => files.push(Candidate {
                path,
                kind: CandidateKind::VersionFile,
            }),
            Eligibility::Mismatched { token } => {
                debug!(
                    slot = %slot,
                    path = %path.display(),
                    token = %token,
                    "Skipping config for another tool version"
                );
                probe.skipped.push(SkippedSource {
                    slot,
                    path,
                    reason: format!(
                        "version token `{}` does not match `{}`",
                        token,
                        gate.token()
                    ),
                });
            }
        }
    }

    probe.candidates.extend(files);
    probe.candidates.extend(dirs);
    Ok(())
}

/// `Ok(false)` for a missing path; an error only when the path exists but
/// cannot be inspected.
pub(crate) fn is_existing_file(path: &Path) -> Result<bool, ContextError> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(ContextError::discovery(path, e)),
    }
}
