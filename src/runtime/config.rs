/*!
 * Runtime Configuration
 * Build number, block rules and tracing switches
 */

use crate::core::errors::{ConfigError, ConfigResult};
use crate::core::limits::{ENV_BLOCKED_NATIVES, ENV_GAME_BUILD, ENV_TRACE_INVOCATIONS};
use crate::core::types::{GameBuild, NativeHash};
use crate::natives::BlockRule;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Runtime configuration
///
/// Every field has a default, so partial JSON documents are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Host build the block rules are evaluated against
    pub game_build: Option<GameBuild>,
    pub blocked_natives: Vec<BlockRule>,
    /// Emit a tracing span per invocation
    pub trace_invocations: bool,
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read overrides from the process environment
    ///
    /// Unset variables keep their defaults; malformed ones are errors.
    pub fn from_env() -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(raw) = read_env(ENV_GAME_BUILD) {
            let build = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_GAME_BUILD.to_string(),
                value: raw.clone(),
            })?;
            config.game_build = Some(build);
        }

        if let Some(raw) = read_env(ENV_BLOCKED_NATIVES) {
            config.blocked_natives = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| parse_native_hash(s).map(BlockRule::always))
                .collect::<ConfigResult<_>>()?;
        }

        if let Some(raw) = read_env(ENV_TRACE_INVOCATIONS) {
            config.trace_invocations = parse_flag(&raw).ok_or_else(|| ConfigError::InvalidValue {
                key: ENV_TRACE_INVOCATIONS.to_string(),
                value: raw.clone(),
            })?;
        }

        Ok(config)
    }

    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn with_game_build(mut self, build: GameBuild) -> Self {
        self.game_build = Some(build);
        self
    }

    #[must_use]
    pub fn with_blocked_native(mut self, rule: BlockRule) -> Self {
        self.blocked_natives.push(rule);
        self
    }

    #[must_use]
    pub fn with_blocked_natives(mut self, rules: impl IntoIterator<Item = BlockRule>) -> Self {
        self.blocked_natives.extend(rules);
        self
    }

    #[must_use]
    pub fn with_invocation_tracing(mut self, enabled: bool) -> Self {
        self.trace_invocations = enabled;
        self
    }
}

/// Parse one native hash: `0x`-prefixed hexadecimal or decimal
pub fn parse_native_hash(raw: &str) -> ConfigResult<NativeHash> {
    let trimmed = raw.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => NativeHash::from_str_radix(hex, 16),
        None => trimmed.parse(),
    };
    parsed.map_err(|_| ConfigError::InvalidHash(raw.to_string()))
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
