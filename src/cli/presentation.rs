//! CLI presentation: text and json formatters per command.

mod contexts;
mod option;
mod shared;
mod status;

pub use contexts::{format_contexts_json, format_contexts_text};
pub use option::{format_option_all_text, format_option_json, format_option_text};
pub use status::{format_status_json, format_status_pipe, format_status_text, StatusReport};
