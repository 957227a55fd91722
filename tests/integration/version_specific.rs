//! Version-specific config files in the system directory.

use brush_context::context::ContextSlot;
use std::fs;

use crate::integration::test_utils::as_paths;
use crate::integration::Sandbox;

const CONTENTS: &str = "unish_foo = \"bar\"\n";

#[test]
fn test_matching_version_file_loads_and_mismatched_is_skipped() {
    let sandbox = Sandbox::new();
    let matched = sandbox.system.join("brush1rc.toml");
    let mismatched = sandbox.system.join("drop999rc.toml");
    fs::create_dir(sandbox.system.join("brush1")).unwrap();
    fs::create_dir(sandbox.system.join("drop999")).unwrap();
    fs::write(&matched, CONTENTS).unwrap();
    fs::write(&mismatched, CONTENTS).unwrap();

    let stack = sandbox.build(sandbox.invocation("status"));
    let loaded = as_paths(stack.loaded_paths());
    assert!(loaded.contains(&matched), "Loaded a version-specific config file.");
    assert!(
        !loaded.contains(&mismatched),
        "Did not load a mismatched version-specific config file."
    );
    assert_eq!(stack.option_str("unish_foo"), Some("bar"));

    let skipped: Vec<_> = stack
        .load_log()
        .skipped()
        .iter()
        .map(|s| s.path.clone())
        .collect();
    assert!(skipped.contains(&mismatched));
    assert!(skipped.contains(&sandbox.system.join("drop999")));
}

#[test]
fn test_version_file_layers_over_plain_file() {
    let sandbox = Sandbox::new();
    let plain = sandbox.system.join("brushrc.toml");
    let matched = sandbox.system.join("brush1rc.toml");
    fs::write(&matched, "contextConfig = \"system-v1\"\n").unwrap();

    let stack = sandbox.build(sandbox.invocation("php-eval"));
    let loaded = as_paths(stack.loaded_paths());
    let at = loaded.iter().position(|p| *p == plain).unwrap();
    assert_eq!(loaded[at + 1], matched);

    let system = stack.context(ContextSlot::System).unwrap();
    assert_eq!(system.source_path(), Some(plain.as_path()));
    assert_eq!(
        system.generic()["contextConfig"].as_str(),
        Some("system-v1")
    );
    // The plain file's command-specific entry is still there.
    assert_eq!(
        system.command_specific()["unit-eval"]["contextConfig"].as_str(),
        Some("system-specific")
    );
}

#[test]
fn test_version_directory_is_a_candidate() {
    let sandbox = Sandbox::new();
    fs::remove_file(sandbox.system.join("brushrc.toml")).unwrap();
    let versioned = sandbox.system.join("brush1").join("brushrc.toml");
    fs::create_dir(sandbox.system.join("brush1")).unwrap();
    fs::write(&versioned, CONTENTS).unwrap();

    let stack = sandbox.build(sandbox.invocation("status"));
    assert!(as_paths(stack.loaded_paths()).contains(&versioned));
}

#[test]
fn test_only_system_is_gated_by_default() {
    let sandbox = Sandbox::new();
    fs::remove_file(sandbox.home_brush.join("brushrc.toml")).unwrap();
    let versioned = sandbox.home_brush.join("brush1rc.toml");
    fs::write(&versioned, CONTENTS).unwrap();

    let stack = sandbox.build(sandbox.invocation("status"));
    assert!(stack.context(ContextSlot::HomeBrush).is_none());

    let gated = brush_context::context::ContextStackBuilder::new(
        sandbox.invocation("status"),
        sandbox.roots(),
    )
    .gate_slot(ContextSlot::HomeBrush)
    .build()
    .unwrap();
    assert!(as_paths(gated.loaded_paths()).contains(&versioned));
}
