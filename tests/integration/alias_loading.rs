//! Alias discovery across search directories and file layouts.

use brush_context::context::{ContextSlot, ContextStackBuilder, OptionValue};
use brush_context::error::ContextError;
use std::fs;

use crate::integration::Sandbox;

#[test]
fn test_site_alias_file_is_recorded_but_not_listed_as_config() {
    let sandbox = Sandbox::new();
    let mut invocation = sandbox.invocation("status");
    invocation.alias_target = Some("@contextAlias".to_string());

    let stack = sandbox.build(invocation);
    let alias_file = sandbox.site.join("aliases.brushrc.toml");
    assert_eq!(stack.load_log().alias_path(), Some(alias_file.as_path()));
    assert!(!stack
        .load_log()
        .config_paths()
        .contains(&alias_file.as_path()));
}

#[test]
fn test_unknown_alias_fails_with_searched_dirs() {
    let sandbox = Sandbox::new();
    let mut invocation = sandbox.invocation("status");
    invocation.alias_target = Some("@missing".to_string());

    let err = ContextStackBuilder::new(invocation, sandbox.roots())
        .build()
        .unwrap_err();
    match err {
        ContextError::UnknownAlias { name, searched } => {
            assert_eq!(name, "missing");
            assert_eq!(searched[0], sandbox.site);
            assert_eq!(searched[1], sandbox.home_brush);
            assert_eq!(searched[2], sandbox.system);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_single_alias_file_in_home_brush() {
    let sandbox = Sandbox::new();
    fs::write(
        sandbox.home_brush.join("stage.alias.brushrc.toml"),
        "contextConfig = \"stage\"\nremote-host = \"web1.example.com\"\n",
    )
    .unwrap();
    let mut invocation = sandbox.invocation("status");
    invocation.alias_target = Some("@stage".to_string());

    let stack = sandbox.build(invocation);
    let alias = stack.context(ContextSlot::Alias).unwrap();
    assert_eq!(alias.name(), "stage");
    assert_eq!(
        alias.metadata()["remote-host"],
        OptionValue::from("web1.example.com")
    );
    assert_eq!(stack.option_str("contextConfig"), Some("stage"));
}

#[test]
fn test_group_file_resolves_dotted_alias() {
    let sandbox = Sandbox::new();
    fs::write(
        sandbox.system.join("prod.aliases.brushrc.toml"),
        "[web]\ncontextConfig = \"prod-web\"\n",
    )
    .unwrap();
    let mut invocation = sandbox.invocation("status");
    invocation.alias_target = Some("@prod.web".to_string());

    let stack = sandbox.build(invocation);
    assert_eq!(stack.option_str("contextConfig"), Some("prod-web"));
}

#[test]
fn test_alias_path_from_invocation_and_config() {
    let sandbox = Sandbox::new();
    let extra = sandbox.path("extra-aliases");
    let configured = sandbox.path("configured-aliases");
    fs::create_dir_all(&extra).unwrap();
    fs::create_dir_all(&configured).unwrap();
    fs::write(
        extra.join("aliases.brushrc.toml"),
        "[fromFlag]\ncontextConfig = \"flag\"\n",
    )
    .unwrap();
    fs::write(
        configured.join("aliases.brushrc.toml"),
        "[fromConfig]\ncontextConfig = \"config\"\n",
    )
    .unwrap();
    fs::write(
        sandbox.home.join(".brushrc.toml"),
        format!("alias-path = {:?}\n", configured.display().to_string()),
    )
    .unwrap();

    let mut invocation = sandbox.invocation("status");
    invocation.alias_paths = vec![extra];
    invocation.alias_target = Some("@fromFlag".to_string());
    let stack = sandbox.build(invocation.clone());
    assert_eq!(stack.option_str("contextConfig"), Some("flag"));

    invocation.alias_target = Some("@fromConfig".to_string());
    let stack = sandbox.build(invocation);
    assert_eq!(stack.option_str("contextConfig"), Some("config"));
}

#[test]
fn test_site_dir_alias_shadows_later_dirs() {
    let sandbox = Sandbox::new();
    fs::write(
        sandbox.system.join("aliases.brushrc.toml"),
        "[contextAlias]\ncontextConfig = \"system-alias\"\n",
    )
    .unwrap();
    let mut invocation = sandbox.invocation("status");
    invocation.alias_target = Some("@contextAlias".to_string());

    let stack = sandbox.build(invocation);
    assert_eq!(stack.option_str("contextConfig"), Some("alias1"));
}
