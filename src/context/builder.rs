//! Context stack builder: one pass over the slots for one invocation.

use crate::config::paths::SearchRoots;
use crate::config::search::SearchPlan;
use crate::config::sources::rc_file::{load_rc_file, parse_key, parse_value};
use crate::context::alias::AliasLoader;
use crate::context::defaults::core_defaults;
use crate::context::diagnostics::LoadLog;
use crate::context::stack::ContextStack;
use crate::context::types::{Context, ContextContribution, ContextSlot, OptionBag, OptionValue};
use crate::error::ContextError;
use std::path::PathBuf;
use tracing::{debug, info};

/// Option whose value (string or list of strings) adds alias search directories.
pub const ALIAS_PATH_OPTION: &str = "alias-path";

/// What the dispatcher knows about the current invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    /// Active command name.
    pub command: String,
    /// `--config`: an rc file, or a directory holding one.
    pub config_path: Option<PathBuf>,
    /// `@alias` target, with or without the `@`.
    pub alias_target: Option<String>,
    /// CMS root directory.
    pub root: Option<PathBuf>,
    /// Site name under `<root>/sites/`; `default` when omitted.
    pub uri: Option<String>,
    /// Extra alias search directories.
    pub alias_paths: Vec<PathBuf>,
    /// Options parsed from the command line.
    pub overrides: OptionBag,
}

impl Invocation {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Default::default()
        }
    }

    /// `<root>/sites/<uri>`, when a root is known.
    pub fn site_dir(&self) -> Option<PathBuf> {
        let root = self.root.as_ref()?;
        let uri = self.uri.as_deref().unwrap_or("default");
        Some(root.join("sites").join(uri))
    }
}

/// Parse a command-line override: `key=value` (TOML value, bare text taken
/// as a string) or a bare `key` meaning `true`.
pub fn parse_override(raw: &str) -> Result<(String, OptionValue), ContextError> {
    let (key, value) = match raw.split_once('=') {
        Some((key, value)) => {
            let value = value.trim();
            let parsed =
                parse_value(value).unwrap_or_else(|_| OptionValue::String(value.to_string()));
            (key, parsed)
        }
        None => (raw, OptionValue::Boolean(true)),
    };
    let key = parse_key(key).map_err(|msg| ContextError::InvalidOverride(format!("{raw}: {msg}")))?;
    Ok((key, value))
}

/// Builds the [`ContextStack`] for one invocation.
pub struct ContextStackBuilder {
    invocation: Invocation,
    plan: SearchPlan,
    process: OptionBag,
    defaults: ContextContribution,
}

impl ContextStackBuilder {
    pub fn new(invocation: Invocation, roots: SearchRoots) -> Self {
        let plan = SearchPlan::new(roots)
            .with_custom(invocation.config_path.clone())
            .with_site_dir(invocation.site_dir())
            .with_backdrop_root(invocation.root.clone());
        let process = invocation.overrides.clone();
        Self {
            invocation,
            plan,
            process,
            defaults: core_defaults(),
        }
    }

    /// Version-gate another slot in addition to `system`.
    pub fn gate_slot(mut self, slot: ContextSlot) -> Self {
        self.plan = self.plan.gate_slot(slot);
        self
    }

    /// Inject a process-level option before the stack is frozen.
    pub fn with_process_override(mut self, name: impl Into<String>, value: OptionValue) -> Self {
        self.process.insert(name.into(), value);
        self
    }

    /// Replace the shipped core defaults.
    pub fn with_defaults(mut self, defaults: ContextContribution) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn build(self) -> Result<ContextStack, ContextError> {
        let mut log = LoadLog::new();
        let mut contexts = Vec::new();

        for slot in ContextSlot::FILE_SLOTS {
            let probe = self.plan.probe(slot)?;
            log.record_skipped(probe.skipped);
            if probe.selected.is_empty() {
                debug!(slot = %slot, "No config source for slot");
                continue;
            }
            let mut contribution = ContextContribution::default();
            let mut source = None;
            for path in probe.selected {
                let path = dunce::canonicalize(&path).unwrap_or(path);
                contribution.overlay(load_rc_file(&path)?);
                info!(slot = %slot, path = %path.display(), "Loaded config source");
                log.record_loaded(slot, path.clone());
                source.get_or_insert(path);
            }
            let mut context = Context::new(slot, contribution);
            if let Some(path) = source {
                context = context.with_source(path);
            }
            contexts.push(context);
        }

        if let Some(target) = self.invocation.alias_target.as_deref() {
            let loader = self.alias_loader(&contexts);
            let alias = loader.load(target)?;
            if let Some(path) = alias.source_path() {
                log.record_loaded(ContextSlot::Alias, path.to_path_buf());
            }
            contexts.push(alias);
        }

        let mut process = Context::new(ContextSlot::Process, ContextContribution::default());
        process.generic_mut().extend(self.process);
        contexts.push(process);
        contexts.push(Context::new(ContextSlot::CoreDefault, self.defaults));

        Ok(ContextStack::from_parts(
            self.invocation.command,
            contexts,
            log,
        ))
    }

    /// Search order: site directory, `~/.brush`, system directory, then
    /// explicit paths from the invocation and from loaded config files.
    fn alias_loader(&self, loaded: &[Context]) -> AliasLoader {
        let roots = self.plan.roots();
        let mut loader = AliasLoader::new(roots.tool_name.clone());
        if let Some(site) = self.plan.site_dir() {
            loader.add_search_dir(site);
        }
        if let Some(home_tool) = roots.home_tool_dir() {
            loader.add_search_dir(home_tool);
        }
        loader.add_search_dir(roots.system_dir.clone());
        for dir in &self.invocation.alias_paths {
            loader.add_search_dir(dir.clone());
        }
        let mut configured: Vec<&Context> = loaded.iter().collect();
        configured.sort_by_key(|ctx| ctx.rank());
        for ctx in configured {
            match ctx.value_for(ALIAS_PATH_OPTION, &self.invocation.command) {
                Some((OptionValue::String(dir), _)) => loader.add_search_dir(dir.as_str()),
                Some((OptionValue::Array(dirs), _)) => {
                    for dir in dirs.iter().filter_map(OptionValue::as_str) {
                        loader.add_search_dir(dir);
                    }
                }
                _ => {}
            }
        }
        loader
    }
}
