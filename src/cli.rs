//! CLI domain: parse, route, output, and presentation only.
//! The context stack is built once in the binary and handed to the route.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{rewrite_alias_target, Cli, Commands, OutputFormat};
pub use presentation::{
    format_contexts_json, format_contexts_text, format_option_json, format_option_text,
    format_status_json, format_status_pipe, format_status_text, StatusReport,
};
pub use route::{invocation_from_cli, RunContext};
