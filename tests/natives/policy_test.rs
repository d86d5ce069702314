/*!
 * Block Policy Tests
 */

use pretty_assertions::assert_eq;
use script_runtime::{BlockRule, NativeBlockPolicy};

#[test]
fn test_rules_from_json() {
    let rules: Vec<BlockRule> = serde_json::from_str(
        r#"[
            {"hash": 16},
            {"hash": 32, "min_build": 1311},
            {"hash": 48, "max_build": 1207}
        ]"#,
    )
    .unwrap();

    let policy = NativeBlockPolicy::new(&rules, Some(1207));
    assert_eq!(policy.blocked_natives(), vec![16, 48]);
    assert!(policy.should_block(48));
    assert!(!policy.should_block(32));
}

#[test]
fn test_reload_replaces_set() {
    let policy = NativeBlockPolicy::new(&[BlockRule::always(1)], None);
    policy.reload(&[BlockRule::always(2), BlockRule::always(3)], None);

    assert!(!policy.should_block(1));
    assert_eq!(policy.blocked_natives(), vec![2, 3]);
    assert_eq!(policy.len(), 2);
}

#[test]
fn test_duplicate_rules_collapse() {
    let policy = NativeBlockPolicy::new(
        &[
            BlockRule::always(7),
            BlockRule::for_builds(7, Some(1), Some(2)),
        ],
        Some(1),
    );
    assert_eq!(policy.blocked_natives(), vec![7]);
}
