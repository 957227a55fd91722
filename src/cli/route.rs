//! CLI route: single route table and run context. Dispatches to the context
//! stack and presentation.

use crate::config::SearchRoots;
use crate::context::{
    parse_override, ContextStack, ContextStackBuilder, Invocation, OptionValue,
};
use crate::error::{ApiError, ContextError};
use tracing::debug;

use crate::cli::parse::{Cli, Commands, OutputFormat};
use crate::cli::presentation::{
    format_contexts_json, format_contexts_text, format_option_all_text, format_option_json,
    format_option_text, format_status_json, format_status_pipe, format_status_text, StatusReport,
};

/// Turn parsed arguments into the invocation the stack builder consumes.
/// `--pipe` and `--verbose` become process-level options.
pub fn invocation_from_cli(cli: &Cli) -> Result<Invocation, ContextError> {
    let mut invocation = Invocation::new(cli.command.name());
    invocation.config_path = cli.config.clone();
    invocation.alias_target = cli.target.clone();
    invocation.root = cli.root.clone();
    invocation.uri = cli.uri.clone();
    invocation.alias_paths = cli.alias_paths.clone();
    for raw in &cli.overrides {
        let (key, value) = parse_override(raw)?;
        invocation.overrides.insert(key, value);
    }
    if cli.pipe {
        invocation
            .overrides
            .insert("pipe".to_string(), OptionValue::Boolean(true));
    }
    if cli.verbose {
        invocation
            .overrides
            .insert("verbose".to_string(), OptionValue::Boolean(true));
    }
    Ok(invocation)
}

/// Runtime context for CLI execution: the frozen stack plus what was asked for.
pub struct RunContext {
    stack: ContextStack,
    invocation: Invocation,
}

impl RunContext {
    /// Build the stack for `invocation` against `roots`.
    pub fn new(invocation: Invocation, roots: SearchRoots) -> Result<Self, ApiError> {
        let stack = ContextStackBuilder::new(invocation.clone(), roots).build()?;
        Ok(Self { stack, invocation })
    }

    /// Build from parsed arguments using roots from the environment.
    pub fn from_cli(cli: &Cli) -> Result<Self, ApiError> {
        Self::new(invocation_from_cli(cli)?, SearchRoots::from_env())
    }

    pub fn stack(&self) -> &ContextStack {
        &self.stack
    }

    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        debug!(command = command.name(), "Executing command");
        match command {
            Commands::Status { format } => {
                let report = StatusReport::from_stack(
                    &self.stack,
                    self.invocation.root.clone(),
                    self.invocation.site_dir(),
                );
                match format {
                    OutputFormat::Json => format_status_json(&report),
                    OutputFormat::Text if self.stack.option_bool("pipe") => {
                        Ok(format_status_pipe(&report))
                    }
                    OutputFormat::Text => Ok(format_status_text(&report)),
                }
            }
            Commands::Option {
                name,
                command,
                default,
                all,
                format,
            } => {
                let active = command.as_deref().unwrap_or(self.stack.command());
                let default = default
                    .as_deref()
                    .map(|raw| OptionValue::String(raw.to_string()))
                    .unwrap_or_else(|| OptionValue::String(String::new()));
                let winner = self.stack.lookup(name, active);
                let values = all.then(|| self.stack.values_of(name, active));
                match format {
                    OutputFormat::Json => format_option_json(
                        name,
                        active,
                        winner.as_ref(),
                        &default,
                        values.as_deref(),
                    ),
                    OutputFormat::Text => Ok(match values {
                        Some(values) => format_option_all_text(name, &values),
                        None => format_option_text(name, winner.as_ref(), &default),
                    }),
                }
            }
            Commands::Contexts { format } => match format {
                OutputFormat::Json => format_contexts_json(&self.stack),
                OutputFormat::Text => Ok(format_contexts_text(&self.stack)),
            },
        }
    }
}
