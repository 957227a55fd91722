//! Context domain: ranked option contexts, the per-invocation stack, and
//! option resolution over it.
//!
//! The stack is built once per invocation by [`ContextStackBuilder`] and then
//! only read. It is passed explicitly to whoever needs option values; there is
//! no process-wide configuration state.

pub mod alias;
pub mod builder;
pub mod defaults;
pub mod diagnostics;
pub mod stack;
pub mod types;

pub use alias::{alias_name, AliasLoader};
pub use builder::{parse_override, ContextStackBuilder, Invocation, ALIAS_PATH_OPTION};
pub use defaults::{core_default_context, core_defaults};
pub use diagnostics::{LoadLog, LoadedSource, SkippedSource};
pub use stack::{ContextStack, Resolution};
pub use types::{CommandSpecific, Context, ContextContribution, ContextSlot, OptionBag, OptionValue};
