/*!
 * Native Block Policy
 * Decides which native hashes are disallowed for the configured build
 *
 * The effective set is derived once from the rules and published through an
 * `ArcSwap`, so queries are lock-free and `should_block` can never disagree
 * with `blocked_natives`: both read the same snapshot.
 */

use crate::core::types::{GameBuild, NativeHash};
use ahash::HashSet;
use arc_swap::ArcSwap;
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One blocked native, optionally limited to an inclusive build range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockRule {
    pub hash: NativeHash,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_build: Option<GameBuild>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_build: Option<GameBuild>,
}

impl BlockRule {
    /// Block on every build
    pub const fn always(hash: NativeHash) -> Self {
        Self {
            hash,
            min_build: None,
            max_build: None,
        }
    }

    /// Block on builds inside `[min, max]`
    pub const fn for_builds(hash: NativeHash, min: Option<GameBuild>, max: Option<GameBuild>) -> Self {
        Self {
            hash,
            min_build: min,
            max_build: max,
        }
    }

    /// Whether this rule applies to `build`
    ///
    /// A ranged rule needs a known build; an unranged rule always applies.
    pub fn applies_to(&self, build: Option<GameBuild>) -> bool {
        if self.min_build.is_none() && self.max_build.is_none() {
            return true;
        }
        let Some(build) = build else {
            return false;
        };
        self.min_build.map_or(true, |min| build >= min) && self.max_build.map_or(true, |max| build <= max)
    }
}

/// Read-mostly set of blocked natives
pub struct NativeBlockPolicy {
    blocked: ArcSwap<HashSet<NativeHash>>,
}

impl NativeBlockPolicy {
    /// Policy that blocks nothing
    pub fn empty() -> Self {
        Self {
            blocked: ArcSwap::from_pointee(HashSet::default()),
        }
    }

    /// Evaluate `rules` against `build`
    pub fn new(rules: &[BlockRule], build: Option<GameBuild>) -> Self {
        Self {
            blocked: ArcSwap::from_pointee(Self::evaluate(rules, build)),
        }
    }

    /// Replace the effective set
    pub fn reload(&self, rules: &[BlockRule], build: Option<GameBuild>) {
        let set = Self::evaluate(rules, build);
        info!(
            "Native block policy reloaded: {} of {} rules active (build {:?})",
            set.len(),
            rules.len(),
            build
        );
        self.blocked.store(Arc::new(set));
    }

    fn evaluate(rules: &[BlockRule], build: Option<GameBuild>) -> HashSet<NativeHash> {
        rules
            .iter()
            .filter(|rule| rule.applies_to(build))
            .map(|rule| rule.hash)
            .collect()
    }

    /// Whether `hash` is disallowed
    #[inline]
    pub fn should_block(&self, hash: NativeHash) -> bool {
        self.blocked.load().contains(&hash)
    }

    /// Every blocked hash, sorted ascending
    pub fn blocked_natives(&self) -> Vec<NativeHash> {
        let mut hashes: Vec<NativeHash> = self.blocked.load().iter().copied().collect();
        hashes.sort_unstable();
        hashes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocked.load().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocked.load().is_empty()
    }
}

impl Default for NativeBlockPolicy {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for NativeBlockPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeBlockPolicy")
            .field("blocked", &self.blocked_natives())
            .finish()
    }
}
