//! Shared sandbox for integration tests
//!
//! Writes one rc file into every slot brush searches, plus a site alias
//! file, inside a temp directory. Each rc file sets `contextConfig` to the
//! slot name and `contextConfig` for `unit-eval` to `<slot>-specific`.

use brush_context::config::SearchRoots;
use brush_context::context::{ContextStack, ContextStackBuilder, Invocation};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SITE: &str = "dev";

pub struct Sandbox {
    _dir: TempDir,
    pub root: PathBuf,
    pub custom: PathBuf,
    pub site: PathBuf,
    pub backdrop: PathBuf,
    pub home: PathBuf,
    pub home_brush: PathBuf,
    pub system: PathBuf,
    /// rc files in the order brush should load them.
    pub written: Vec<PathBuf>,
}

fn rc_contents(key: &str) -> String {
    format!(
        "# Written by the brush test sandbox. Safe to delete.\n\
         contextConfig = \"{key}\"\n\
         \n\
         [command-specific.unit-eval]\n\
         contextConfig = \"{key}-specific\"\n"
    )
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dunce::canonicalize(dir.path()).unwrap();
        let backdrop = root.join("web");
        let site = backdrop.join("sites").join(SITE);
        let home = root.join("home");
        let home_brush = home.join(".brush");
        let system = root.join("etc").join("brush");
        for path in [&site, &home_brush, &system] {
            fs::create_dir_all(path).unwrap();
        }

        let slots: [(&str, PathBuf); 6] = [
            ("custom", root.join("brushrc.toml")),
            ("site", site.join("brushrc.toml")),
            ("backdrop", backdrop.join("brushrc.toml")),
            ("user", home.join(".brushrc.toml")),
            ("home.brush", home_brush.join("brushrc.toml")),
            ("system", system.join("brushrc.toml")),
        ];
        let mut written = Vec::new();
        for (key, path) in slots {
            fs::write(&path, rc_contents(key)).unwrap();
            written.push(path);
        }

        fs::write(
            site.join("aliases.brushrc.toml"),
            "[contextAlias]\n\
             contextConfig = \"alias1\"\n\
             \n\
             [contextAlias.command-specific.unit-eval]\n\
             contextConfig = \"alias-specific\"\n",
        )
        .unwrap();

        Self {
            _dir: dir,
            custom: root.clone(),
            root,
            site,
            backdrop,
            home,
            home_brush,
            system,
            written,
        }
    }

    pub fn roots(&self) -> SearchRoots {
        SearchRoots::new(Some(self.home.clone()), self.system.clone(), 1)
    }

    /// Invocation with `--root` and `--uri` pointing at the sandbox site.
    pub fn invocation(&self, command: &str) -> Invocation {
        let mut invocation = Invocation::new(command);
        invocation.root = Some(self.backdrop.clone());
        invocation.uri = Some(SITE.to_string());
        invocation
    }

    pub fn build(&self, invocation: Invocation) -> ContextStack {
        ContextStackBuilder::new(invocation, self.roots())
            .build()
            .unwrap()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }
}

pub fn as_paths(paths: Vec<&Path>) -> Vec<PathBuf> {
    paths.into_iter().map(Path::to_path_buf).collect()
}
