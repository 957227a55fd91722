//! CLI parse: clap types for brush. No behavior beyond argument shaping.

use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

/// Brush - context-aware site management
#[derive(Parser, Debug)]
#[command(name = "brush")]
#[command(about = "Site management with layered, per-command configuration")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Alias target (`@name`). A leading `@name` argument is accepted too.
    #[arg(long, global = true)]
    pub target: Option<String>,

    /// Explicit config file, or a directory holding brushrc.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// CMS root directory
    #[arg(long, short = 'r', global = true)]
    pub root: Option<PathBuf>,

    /// Site under <root>/sites/ (default: "default")
    #[arg(long, short = 'l', global = true)]
    pub uri: Option<String>,

    /// Additional alias search directory (repeatable)
    #[arg(long = "alias-path", global = true)]
    pub alias_paths: Vec<PathBuf>,

    /// Set an option for this invocation: KEY=VALUE, or KEY for true (repeatable)
    #[arg(long = "set", value_name = "KEY[=VALUE]", global = true)]
    pub overrides: Vec<String>,

    /// Machine-readable single-line output
    #[arg(long, global = true)]
    pub pipe: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Disable logging
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show which configuration sources were loaded
    Status {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Resolve one option and show where its value came from
    Option {
        /// Option name
        name: String,
        /// Resolve as if this command were running (default: "option")
        #[arg(long)]
        command: Option<String>,
        /// Value to report when no context defines the option
        #[arg(long)]
        default: Option<String>,
        /// List the value from every context, not only the winner
        #[arg(long)]
        all: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show the context stack in precedence order
    Contexts {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

impl Commands {
    /// Command name used for command-specific option lookup.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Status { .. } => "status",
            Commands::Option { .. } => "option",
            Commands::Contexts { .. } => "contexts",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Rewrite a leading `@alias` argument (the first one after the program
/// name) into `--target @alias` so clap can parse it as an ordinary flag.
/// `@` values later on the line are left alone.
pub fn rewrite_alias_target<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().collect();
    let leading_alias = args
        .get(1)
        .and_then(|arg| arg.to_str())
        .map(|arg| arg.starts_with('@'))
        .unwrap_or(false);
    if leading_alias {
        args.insert(1, OsString::from("--target"));
    }
    args
}
