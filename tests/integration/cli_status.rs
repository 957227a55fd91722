//! End-to-end runs of the brush binary against the sandbox.

use std::path::Path;
use std::process::{Command, Output};

use crate::integration::test_utils::SITE;
use crate::integration::Sandbox;

fn brush(sandbox: &Sandbox, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_brush");
    Command::new(bin)
        .env("HOME", sandbox.home.as_os_str())
        .env("BRUSH_SYSTEM_CONFIG_DIR", sandbox.system.as_os_str())
        .env_remove("BRUSH_LOG")
        .env_remove("BRUSH_LOG_FORMAT")
        .env_remove("BRUSH_LOG_OUTPUT")
        .env_remove("BRUSH_LOG_MODULES")
        .args(args)
        .output()
        .unwrap()
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_status_pipe_lists_loaded_config_files() {
    let sandbox = Sandbox::new();
    let output = brush(
        &sandbox,
        &[
            "--pipe",
            "--config",
            path_arg(&sandbox.custom),
            "--root",
            path_arg(&sandbox.backdrop),
            "--uri",
            SITE,
            "status",
        ],
    );
    assert!(
        output.status.success(),
        "brush status should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let loaded: Vec<&str> = stdout.trim().split(' ').collect();
    let expected: Vec<String> = sandbox
        .written
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    assert_eq!(loaded, expected);
}

#[test]
fn test_status_text_names_alias_file() {
    let sandbox = Sandbox::new();
    let output = brush(
        &sandbox,
        &[
            "@contextAlias",
            "--root",
            path_arg(&sandbox.backdrop),
            "--uri",
            SITE,
            "status",
        ],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Brush configuration"));
    assert!(stdout.contains("Alias file"));
    assert!(stdout.contains("aliases.brushrc.toml"));
}

#[test]
fn test_option_reports_command_specific_winner() {
    let sandbox = Sandbox::new();
    let output = brush(
        &sandbox,
        &[
            "--root",
            path_arg(&sandbox.backdrop),
            "--uri",
            SITE,
            "option",
            "contextConfig",
            "--command",
            "unit-eval",
            "--format",
            "json",
        ],
    );
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["value"], "site-specific");
    assert_eq!(json["source"]["slot"], "site");
    assert_eq!(json["source"]["command_specific"], true);
}

#[test]
fn test_unknown_alias_exits_non_zero() {
    let sandbox = Sandbox::new();
    let output = brush(&sandbox, &["@nope", "status"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No such alias: @nope"), "{stderr}");
    assert!(stderr.contains("--alias-path"), "{stderr}");
}

#[test]
fn test_quiet_keeps_stderr_clean() {
    let sandbox = Sandbox::new();
    let output = brush(&sandbox, &["--quiet", "--verbose", "status"]);
    assert!(output.status.success());
    assert!(output.stderr.is_empty());
}
