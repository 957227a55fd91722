//! Built-in fallback values: the core-default context.

use crate::context::types::{Context, ContextContribution, ContextSlot, OptionValue};

/// Options every invocation can rely on having a value for.
pub fn core_defaults() -> ContextContribution {
    let mut defaults = ContextContribution::default();
    defaults.set("pipe", OptionValue::Boolean(false));
    defaults.set("verbose", OptionValue::Boolean(false));
    defaults.set("simulate", OptionValue::Boolean(false));
    defaults.set("format", OptionValue::from("text"));
    defaults.set("log-level", OptionValue::from("warn"));
    defaults.set("log-format", OptionValue::from("text"));
    defaults.set("log-output", OptionValue::from("stderr"));
    defaults
}

pub fn core_default_context() -> Context {
    Context::new(ContextSlot::CoreDefault, core_defaults())
}
