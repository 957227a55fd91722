//! Contexts presentation: the stack in precedence order.

use super::shared::{display_source, display_value};
use crate::context::ContextStack;
use crate::error::ApiError;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use owo_colors::OwoColorize;

fn section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

pub fn format_contexts_text(stack: &ContextStack) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Rank", "Context", "Source", "Options"]);
    for ctx in stack.contexts() {
        let mut options: Vec<String> = ctx
            .generic()
            .iter()
            .map(|(k, v)| format!("{} = {}", k, display_value(v)))
            .collect();
        for (command, bag) in ctx.command_specific() {
            for (k, v) in bag {
                options.push(format!("[{}] {} = {}", command, k, display_value(v)));
            }
        }
        table.add_row(vec![
            ctx.rank().to_string(),
            ctx.name().to_string(),
            display_source(ctx.source_path()),
            options.join("\n"),
        ]);
    }
    format!(
        "{}\n{}",
        section_heading(&format!("Context stack for `{}`", stack.command())),
        table
    )
}

pub fn format_contexts_json(stack: &ContextStack) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(stack)?)
}
