//! Shared context types: slots, ranks, option bags and the Context record itself.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// A single option value. Values keep the type they were written with.
pub type OptionValue = toml::Value;

/// Option name to value. Ordered so listings and JSON output are stable.
pub type OptionBag = BTreeMap<String, OptionValue>;

/// Command name to the option bag that applies only while that command runs.
pub type CommandSpecific = BTreeMap<String, OptionBag>;

/// Well-known context slots in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContextSlot {
    /// Options injected by the invocation itself (command-line flags).
    Process,
    /// The named `@alias` target.
    Alias,
    /// The file passed with `--config`.
    Custom,
    Site,
    BackdropRoot,
    User,
    #[serde(rename = "home.brush")]
    HomeBrush,
    System,
    /// Built-in fallbacks shipped with the tool.
    CoreDefault,
}

impl ContextSlot {
    /// Every slot, highest priority first.
    pub const ALL: [ContextSlot; 9] = [
        ContextSlot::Process,
        ContextSlot::Alias,
        ContextSlot::Custom,
        ContextSlot::Site,
        ContextSlot::BackdropRoot,
        ContextSlot::User,
        ContextSlot::HomeBrush,
        ContextSlot::System,
        ContextSlot::CoreDefault,
    ];

    /// Slots that are backed by a config file found through the search paths.
    pub const FILE_SLOTS: [ContextSlot; 6] = [
        ContextSlot::Custom,
        ContextSlot::Site,
        ContextSlot::BackdropRoot,
        ContextSlot::User,
        ContextSlot::HomeBrush,
        ContextSlot::System,
    ];

    /// Fixed rank; lower is consulted first.
    pub fn rank(self) -> u8 {
        match self {
            ContextSlot::Process => 1,
            ContextSlot::Alias => 2,
            ContextSlot::Custom => 3,
            ContextSlot::Site => 4,
            ContextSlot::BackdropRoot => 5,
            ContextSlot::User => 6,
            ContextSlot::HomeBrush => 7,
            ContextSlot::System => 8,
            ContextSlot::CoreDefault => 9,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContextSlot::Process => "process",
            ContextSlot::Alias => "alias",
            ContextSlot::Custom => "custom",
            ContextSlot::Site => "site",
            ContextSlot::BackdropRoot => "backdrop-root",
            ContextSlot::User => "user",
            ContextSlot::HomeBrush => "home.brush",
            ContextSlot::System => "system",
            ContextSlot::CoreDefault => "core-default",
        }
    }
}

impl fmt::Display for ContextSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generic and command-specific options parsed out of one source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextContribution {
    #[serde(default)]
    pub generic: OptionBag,
    #[serde(default, rename = "command-specific")]
    pub command_specific: CommandSpecific,
}

impl ContextContribution {
    pub fn is_empty(&self) -> bool {
        self.generic.is_empty() && self.command_specific.is_empty()
    }

    pub fn set(&mut self, name: impl Into<String>, value: OptionValue) {
        self.generic.insert(name.into(), value);
    }

    pub fn set_for_command(
        &mut self,
        command: impl Into<String>,
        name: impl Into<String>,
        value: OptionValue,
    ) {
        self.command_specific
            .entry(command.into())
            .or_default()
            .insert(name.into(), value);
    }

    /// Layer `overlay` on top: its values replace ours key by key.
    pub fn overlay(&mut self, overlay: ContextContribution) {
        self.generic.extend(overlay.generic);
        for (command, bag) in overlay.command_specific {
            self.command_specific.entry(command).or_default().extend(bag);
        }
    }
}

/// A named, ranked configuration contribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Context {
    name: String,
    slot: ContextSlot,
    generic: OptionBag,
    #[serde(rename = "command-specific")]
    command_specific: CommandSpecific,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "OptionBag::is_empty")]
    metadata: OptionBag,
}

impl Context {
    /// Context for a well-known slot; named after the slot.
    pub fn new(slot: ContextSlot, contribution: ContextContribution) -> Self {
        Self::named(slot.as_str(), slot, contribution)
    }

    pub fn named(
        name: impl Into<String>,
        slot: ContextSlot,
        contribution: ContextContribution,
    ) -> Self {
        Self {
            name: name.into(),
            slot,
            generic: contribution.generic,
            command_specific: contribution.command_specific,
            source_path: None,
            metadata: OptionBag::new(),
        }
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    pub fn with_metadata(mut self, metadata: OptionBag) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slot(&self) -> ContextSlot {
        self.slot
    }

    pub fn rank(&self) -> u8 {
        self.slot.rank()
    }

    pub fn generic(&self) -> &OptionBag {
        &self.generic
    }

    pub fn command_specific(&self) -> &CommandSpecific {
        &self.command_specific
    }

    /// Backing file, `None` for synthetic contexts. When a version-specific
    /// file is layered over the plain one, this is the plain file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Opaque alias fields (remote connection info and the like).
    pub fn metadata(&self) -> &OptionBag {
        &self.metadata
    }

    /// This context's value for `option` while `command` runs: the
    /// command-specific entry first, then the generic one.
    ///
    /// Returns `(value, is_command_specific)`.
    pub fn value_for(&self, option: &str, command: &str) -> Option<(&OptionValue, bool)> {
        if let Some(value) = self
            .command_specific
            .get(command)
            .and_then(|bag| bag.get(option))
        {
            return Some((value, true));
        }
        self.generic.get(option).map(|value| (value, false))
    }

    /// Mutable generic bag. Only reachable before the stack is frozen.
    pub(crate) fn generic_mut(&mut self) -> &mut OptionBag {
        &mut self.generic
    }
}
