//! Alias loader: turns an `@name` target into the alias context.
//!
//! Directories are searched in order; within a directory the single-alias
//! file comes first, then the group file for dotted names, then the shared
//! `aliases.brushrc.toml`. The first definition found is used.

use crate::config::search::is_existing_file;
use crate::config::sources::alias_file::{find_in_alias_file, load_single_alias, AliasRecord};
use crate::context::types::{Context, ContextSlot};
use crate::error::ContextError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Strip the leading `@` from an alias target.
pub fn alias_name(target: &str) -> &str {
    target.strip_prefix('@').unwrap_or(target)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Lookup {
    /// File holds exactly this alias.
    Single,
    /// Multi-alias file; look the record up under this key.
    Keyed(String),
}

/// Searches alias directories for one alias definition.
#[derive(Debug, Clone, Default)]
pub struct AliasLoader {
    search_dirs: Vec<PathBuf>,
    tool_name: String,
}

impl AliasLoader {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            search_dirs: Vec::new(),
            tool_name: tool_name.into(),
        }
    }

    /// Append a search directory. Repeated directories are searched once.
    pub fn add_search_dir(&mut self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        if !self.search_dirs.contains(&dir) {
            self.search_dirs.push(dir);
        }
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Materialize `target` (`@name` or `name`) as the alias context.
    pub fn load(&self, target: &str) -> Result<Context, ContextError> {
        let name = alias_name(target);
        let record = self
            .find(name)?
            .ok_or_else(|| ContextError::UnknownAlias {
                name: name.to_string(),
                searched: self.search_dirs.clone(),
            })?;
        info!(
            alias = %record.name,
            path = %record.source_path.display(),
            "Loaded alias"
        );
        Ok(
            Context::named(record.name, ContextSlot::Alias, record.contribution)
                .with_source(record.source_path)
                .with_metadata(record.metadata),
        )
    }

    /// First definition of `name` across the search directories.
    pub fn find(&self, name: &str) -> Result<Option<AliasRecord>, ContextError> {
        if name.is_empty() {
            return Ok(None);
        }
        for dir in &self.search_dirs {
            for (path, lookup) in self.candidates(dir, name) {
                debug!(alias = name, path = %path.display(), "Probing alias file");
                if !is_existing_file(&path)? {
                    continue;
                }
                let path = dunce::canonicalize(&path).unwrap_or(path);
                let found = match lookup {
                    Lookup::Single => Some(load_single_alias(&path, name)?),
                    Lookup::Keyed(key) => find_in_alias_file(&path, &key)?.map(|mut record| {
                        record.name = name.to_string();
                        record
                    }),
                };
                if found.is_some() {
                    return Ok(found);
                }
            }
        }
        Ok(None)
    }

    fn candidates(&self, dir: &Path, name: &str) -> Vec<(PathBuf, Lookup)> {
        let suffix = format!("{}rc.toml", self.tool_name);
        let mut out = vec![(
            dir.join(format!("{}.alias.{}", name, suffix)),
            Lookup::Single,
        )];
        if let Some((group, member)) = name.split_once('.') {
            out.push((
                dir.join(format!("{}.aliases.{}", group, suffix)),
                Lookup::Keyed(member.to_string()),
            ));
        }
        out.push((
            dir.join(format!("aliases.{}", suffix)),
            Lookup::Keyed(name.to_string()),
        ));
        out
    }
}
