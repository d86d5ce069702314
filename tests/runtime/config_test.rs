/*!
 * Runtime Configuration Tests
 * Environment overrides and JSON files
 */

use pretty_assertions::assert_eq;
use script_runtime::core::limits::{ENV_BLOCKED_NATIVES, ENV_GAME_BUILD, ENV_TRACE_INVOCATIONS};
use script_runtime::{BlockRule, ConfigError, RuntimeConfig};
use serial_test::serial;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

fn clear_env() {
    for key in [ENV_GAME_BUILD, ENV_BLOCKED_NATIVES, ENV_TRACE_INVOCATIONS] {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();
    assert_eq!(RuntimeConfig::from_env().unwrap(), RuntimeConfig::default());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var(ENV_GAME_BUILD, "1311");
    std::env::set_var(ENV_BLOCKED_NATIVES, "0x1234, 42 ,,0XFF");
    std::env::set_var(ENV_TRACE_INVOCATIONS, "true");

    let config = RuntimeConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.game_build, Some(1311));
    assert_eq!(
        config.blocked_natives,
        vec![
            BlockRule::always(0x1234),
            BlockRule::always(42),
            BlockRule::always(0xFF)
        ]
    );
    assert!(config.trace_invocations);
}

#[test]
#[serial]
fn test_from_env_rejects_bad_values() {
    clear_env();
    std::env::set_var(ENV_GAME_BUILD, "latest");
    assert!(matches!(
        RuntimeConfig::from_env(),
        Err(ConfigError::InvalidValue { key, .. }) if key == ENV_GAME_BUILD
    ));

    clear_env();
    std::env::set_var(ENV_BLOCKED_NATIVES, "0x12,nope");
    assert!(matches!(
        RuntimeConfig::from_env(),
        Err(ConfigError::InvalidHash(raw)) if raw == "nope"
    ));
    clear_env();
}

#[test]
fn test_from_json_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "game_build": 1436,
            "blocked_natives": [{{"hash": 16, "min_build": 1400}}],
            "trace_invocations": false
        }}"#
    )
    .unwrap();

    let config = RuntimeConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.game_build, Some(1436));
    assert_eq!(
        config.blocked_natives,
        vec![BlockRule::for_builds(16, Some(1400), None)]
    );
}

#[test]
fn test_missing_and_malformed_files() {
    let dir = tempdir().unwrap();

    let missing = RuntimeConfig::from_json_file(dir.path().join("absent.json"));
    assert!(matches!(missing, Err(ConfigError::Io(_))));

    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        RuntimeConfig::from_json_file(&path),
        Err(ConfigError::Parse(_))
    ));
}
