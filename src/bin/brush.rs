//! Brush CLI Binary
//!
//! Builds the context stack for one invocation and reports on it.

use brush_context::cli::{map_error, rewrite_alias_target, Cli, RunContext};
use brush_context::logging::{init_logging, LoggingConfig};
use clap::Parser;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse_from(rewrite_alias_target(std::env::args_os()));

    // Build logging config from the context stack and CLI flags
    let logging_config = build_logging_config(&cli);

    // Initialize logging before the real stack build so discovery is traced
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Brush CLI starting");

    let context = match RunContext::from_cli(&cli) {
        Ok(ctx) => {
            info!(
                command = ctx.stack().command(),
                sources = ctx.stack().loaded_paths().len(),
                "Context stack built"
            );
            ctx
        }
        Err(e) => {
            error!("Error building context stack: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from the context stack and CLI flags.
/// Precedence: CLI flags override stack options override defaults. A stack
/// that fails to build here falls back to defaults; the error is reported
/// when the run context is built.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = RunContext::from_cli(cli)
        .ok()
        .map(|ctx| LoggingConfig::from_stack(ctx.stack()))
        .unwrap_or_default();
    apply_cli_flags(&mut config, cli);
    config
}

fn apply_cli_flags(config: &mut LoggingConfig, cli: &Cli) {
    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
}
