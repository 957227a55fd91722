//! The frozen context stack and option resolution over it.
//!
//! Resolution walks contexts in rank order. Within one context the
//! command-specific value beats the generic one; as soon as a context has
//! either, the walk stops. A higher-ranked generic value therefore shadows a
//! lower-ranked command-specific one.

use crate::context::diagnostics::LoadLog;
use crate::context::types::{Context, ContextSlot, OptionBag, OptionValue};
use serde::Serialize;
use std::path::Path;

/// Where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution<'a> {
    pub value: &'a OptionValue,
    pub context: &'a str,
    pub slot: ContextSlot,
    pub rank: u8,
    pub command_specific: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_path: Option<&'a Path>,
}

/// Ordered contexts for one invocation. Read-only once built.
#[derive(Debug, Clone, Serialize)]
pub struct ContextStack {
    command: String,
    contexts: Vec<Context>,
    #[serde(rename = "load_log")]
    log: LoadLog,
}

impl ContextStack {
    pub(crate) fn from_parts(command: String, mut contexts: Vec<Context>, log: LoadLog) -> Self {
        contexts.sort_by_key(Context::rank);
        Self {
            command,
            contexts,
            log,
        }
    }

    /// Active command name for this invocation.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Contexts in rank order.
    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    pub fn context(&self, slot: ContextSlot) -> Option<&Context> {
        self.contexts.iter().find(|ctx| ctx.slot() == slot)
    }

    /// First hit for `name` while `command` runs, with its origin.
    pub fn lookup(&self, name: &str, command: &str) -> Option<Resolution<'_>> {
        self.contexts
            .iter()
            .find_map(|ctx| resolution_in(ctx, name, command))
    }

    pub fn get(&self, name: &str, command: &str) -> Option<&OptionValue> {
        self.lookup(name, command).map(|r| r.value)
    }

    /// Effective value of `name` for `command`, or `default` when no context
    /// defines it.
    pub fn resolve(&self, name: &str, command: &str, default: OptionValue) -> OptionValue {
        self.get(name, command).cloned().unwrap_or(default)
    }

    /// [`resolve`](Self::resolve) for the active command.
    pub fn option(&self, name: &str, default: OptionValue) -> OptionValue {
        self.resolve(name, &self.command, default)
    }

    /// Truthiness of an option for the active command; absent is `false`.
    pub fn option_bool(&self, name: &str) -> bool {
        match self.get(name, &self.command) {
            Some(OptionValue::Boolean(b)) => *b,
            Some(OptionValue::Integer(i)) => *i != 0,
            Some(OptionValue::String(s)) => {
                matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
            }
            _ => false,
        }
    }

    pub fn option_str(&self, name: &str) -> Option<&str> {
        self.get(name, &self.command).and_then(OptionValue::as_str)
    }

    /// Every context's value for `name`, highest rank first.
    pub fn values_of(&self, name: &str, command: &str) -> Vec<Resolution<'_>> {
        self.contexts
            .iter()
            .filter_map(|ctx| resolution_in(ctx, name, command))
            .collect()
    }

    /// Effective option bag for `command`: every known option name with its
    /// resolved value.
    pub fn merged(&self, command: &str) -> OptionBag {
        let mut merged = OptionBag::new();
        for ctx in self.contexts.iter().rev() {
            for (name, value) in ctx.generic() {
                merged.insert(name.clone(), value.clone());
            }
            if let Some(specific) = ctx.command_specific().get(command) {
                for (name, value) in specific {
                    merged.insert(name.clone(), value.clone());
                }
            }
        }
        merged
    }

    pub fn load_log(&self) -> &LoadLog {
        &self.log
    }

    /// Source files that fed the stack, in rank order.
    pub fn loaded_paths(&self) -> Vec<&Path> {
        self.log.loaded_paths()
    }
}

fn resolution_in<'a>(ctx: &'a Context, name: &str, command: &str) -> Option<Resolution<'a>> {
    ctx.value_for(name, command)
        .map(|(value, command_specific)| Resolution {
            value,
            context: ctx.name(),
            slot: ctx.slot(),
            rank: ctx.rank(),
            command_specific,
            source_path: ctx.source_path(),
        })
}
