//! Load log: which sources fed the stack, in rank order, and which
//! version-specific candidates were deliberately passed over.

use crate::context::types::ContextSlot;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A source file that became a context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedSource {
    pub slot: ContextSlot,
    pub path: PathBuf,
}

/// A version-gated candidate rejected during discovery. Not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSource {
    pub slot: ContextSlot,
    pub path: PathBuf,
    pub reason: String,
}

/// Ordered record of discovery. Entries are kept in slot rank order no
/// matter when they were recorded (the alias file is found after the config
/// files but outranks them).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadLog {
    loaded: Vec<LoadedSource>,
    skipped: Vec<SkippedSource>,
}

impl LoadLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_loaded(&mut self, slot: ContextSlot, path: PathBuf) {
        let at = self
            .loaded
            .iter()
            .position(|entry| entry.slot.rank() > slot.rank())
            .unwrap_or(self.loaded.len());
        self.loaded.insert(at, LoadedSource { slot, path });
    }

    pub(crate) fn record_skipped(&mut self, skipped: impl IntoIterator<Item = SkippedSource>) {
        self.skipped.extend(skipped);
    }

    /// Every loaded source, alias file included, in rank order.
    pub fn loaded(&self) -> &[LoadedSource] {
        &self.loaded
    }

    pub fn loaded_paths(&self) -> Vec<&Path> {
        self.loaded.iter().map(|entry| entry.path.as_path()).collect()
    }

    /// Loaded rc files only (the alias file left out).
    pub fn config_paths(&self) -> Vec<&Path> {
        self.loaded
            .iter()
            .filter(|entry| entry.slot != ContextSlot::Alias)
            .map(|entry| entry.path.as_path())
            .collect()
    }

    pub fn alias_path(&self) -> Option<&Path> {
        self.loaded
            .iter()
            .find(|entry| entry.slot == ContextSlot::Alias)
            .map(|entry| entry.path.as_path())
    }

    pub fn skipped(&self) -> &[SkippedSource] {
        &self.skipped
    }
}
