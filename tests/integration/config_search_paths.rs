//! Every slot's rc file is discovered and loaded in rank order.

use brush_context::context::ContextSlot;

use crate::integration::test_utils::as_paths;
use crate::integration::Sandbox;

#[test]
fn test_all_config_files_load_in_rank_order() {
    let sandbox = Sandbox::new();
    let mut invocation = sandbox.invocation("status");
    invocation.config_path = Some(sandbox.custom.clone());

    let stack = sandbox.build(invocation);
    assert_eq!(as_paths(stack.load_log().config_paths()), sandbox.written);
    assert!(stack.load_log().skipped().is_empty());
}

#[test]
fn test_each_file_lands_in_its_slot() {
    let sandbox = Sandbox::new();
    let mut invocation = sandbox.invocation("status");
    invocation.config_path = Some(sandbox.custom.clone());

    let stack = sandbox.build(invocation);
    let expected = [
        (ContextSlot::Custom, "custom"),
        (ContextSlot::Site, "site"),
        (ContextSlot::BackdropRoot, "backdrop"),
        (ContextSlot::User, "user"),
        (ContextSlot::HomeBrush, "home.brush"),
        (ContextSlot::System, "system"),
    ];
    for (slot, value) in expected {
        let ctx = stack.context(slot).unwrap();
        assert_eq!(ctx.generic()["contextConfig"].as_str(), Some(value), "{slot}");
    }
}

#[test]
fn test_without_root_site_and_backdrop_are_skipped() {
    let sandbox = Sandbox::new();
    let stack = sandbox.build(brush_context::context::Invocation::new("status"));
    let loaded = as_paths(stack.load_log().config_paths());
    assert_eq!(loaded, sandbox.written[3..].to_vec());
    assert!(stack.context(ContextSlot::Site).is_none());
    assert!(stack.context(ContextSlot::Custom).is_none());
}

#[test]
fn test_missing_custom_config_is_not_an_error() {
    let sandbox = Sandbox::new();
    let mut invocation = sandbox.invocation("status");
    invocation.config_path = Some(sandbox.path("nowhere/brushrc.toml"));

    let stack = sandbox.build(invocation);
    assert!(stack.context(ContextSlot::Custom).is_none());
    assert_eq!(stack.load_log().config_paths().len(), 5);
}

#[test]
fn test_malformed_rc_file_fails_the_build() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.home.join(".brushrc.toml"), "contextConfig = \"ok\"\njunk\n").unwrap();

    let err = brush_context::context::ContextStackBuilder::new(
        sandbox.invocation("status"),
        sandbox.roots(),
    )
    .build()
    .unwrap_err();
    let message = err.to_string();
    assert!(message.contains(".brushrc.toml"), "{message}");
    assert!(message.contains("line 2"), "{message}");
}

#[test]
fn test_building_twice_gives_the_same_stack() {
    let sandbox = Sandbox::new();
    let mut invocation = sandbox.invocation("unit-eval");
    invocation.config_path = Some(sandbox.custom.clone());
    invocation.alias_target = Some("@contextAlias".to_string());

    let first = sandbox.build(invocation.clone());
    let second = sandbox.build(invocation);
    assert_eq!(first.contexts(), second.contexts());
    assert_eq!(first.load_log(), second.load_log());
}
