//! Alias file source.
//!
//! Alias files are plain TOML. A multi-alias file (`aliases.brushrc.toml`,
//! `<group>.aliases.brushrc.toml`) holds one top-level table per alias; a
//! single-alias file (`<name>.alias.brushrc.toml`) is itself the record.
//!
//! ```toml
//! [contextAlias]
//! contextConfig = "alias1"
//! remote-host = "web1.example.com"
//!
//! [contextAlias.command-specific.unit-eval]
//! contextConfig = "alias-specific"
//! ```

use crate::context::types::{ContextContribution, OptionBag};
use crate::error::ContextError;
use std::path::{Path, PathBuf};

/// Record keys carried through as opaque metadata rather than options.
pub const METADATA_KEYS: &[&str] = &[
    "remote-host",
    "remote-user",
    "remote-port",
    "ssh-options",
    "os",
    "path-aliases",
];

const COMMAND_SPECIFIC_KEY: &str = "command-specific";

/// One alias definition as read from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasRecord {
    pub name: String,
    pub contribution: ContextContribution,
    pub metadata: OptionBag,
    pub source_path: PathBuf,
}

/// Load a single-alias file; the whole document is the record.
pub fn load_single_alias(path: &Path, name: &str) -> Result<AliasRecord, ContextError> {
    let table = read_table(path)?;
    record_from_table(name, table, path)
}

/// Look `name` up in a multi-alias file. `Ok(None)` when the file does not
/// define it.
pub fn find_in_alias_file(path: &Path, name: &str) -> Result<Option<AliasRecord>, ContextError> {
    let mut table = read_table(path)?;
    match table.remove(name) {
        None => Ok(None),
        Some(toml::Value::Table(record)) => record_from_table(name, record, path).map(Some),
        Some(_) => Err(ContextError::parse(
            path,
            None,
            format!("alias `{}` must be a table", name),
        )),
    }
}

fn read_table(path: &Path) -> Result<toml::Table, ContextError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ContextError::discovery(path, e))?;
    toml::from_str(&contents).map_err(|e| ContextError::parse(path, None, e.message()))
}

fn record_from_table(
    name: &str,
    table: toml::Table,
    path: &Path,
) -> Result<AliasRecord, ContextError> {
    let mut contribution = ContextContribution::default();
    let mut metadata = OptionBag::new();

    for (key, value) in table {
        if key == COMMAND_SPECIFIC_KEY {
            let commands = match value {
                toml::Value::Table(commands) => commands,
                _ => {
                    return Err(ContextError::parse(
                        path,
                        None,
                        format!("`{}.{}` must be a table", name, COMMAND_SPECIFIC_KEY),
                    ))
                }
            };
            for (command, options) in commands {
                let toml::Value::Table(options) = options else {
                    return Err(ContextError::parse(
                        path,
                        None,
                        format!(
                            "`{}.{}.{}` must be a table",
                            name, COMMAND_SPECIFIC_KEY, command
                        ),
                    ));
                };
                for (option, value) in options {
                    contribution.set_for_command(command.clone(), option, value);
                }
            }
        } else if METADATA_KEYS.contains(&key.as_str()) {
            metadata.insert(key, value);
        } else {
            contribution.set(key, value);
        }
    }

    Ok(AliasRecord {
        name: name.to_string(),
        contribution,
        metadata,
        source_path: path.to_path_buf(),
    })
}
