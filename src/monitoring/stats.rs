/*!
 * Lock-Free Dispatch Statistics
 * Atomic counters for the native invocation hot path
 */

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic dispatch statistics
///
/// # Performance
/// - Cache-line aligned to prevent false sharing
/// - Relaxed ordering; snapshots are not linearizable across counters
#[repr(C, align(64))]
#[derive(Debug, Default)]
pub struct DispatchStats {
    invocations: AtomicU64,
    unresolved: AtomicU64,
    rejected: AtomicU64,
}

/// Point-in-time copy of [`DispatchStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchStatsSnapshot {
    /// Invocations that reached a handler
    pub invocations: u64,
    /// Invocations skipped because no handler was registered
    pub unresolved: u64,
    /// Invocations aborted while packing arguments or extracting the result
    pub rejected: u64,
}

impl DispatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn inc_invocations(&self) {
        self.invocations.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_unresolved(&self) {
        self.unresolved.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> DispatchStatsSnapshot {
        DispatchStatsSnapshot {
            invocations: self.invocations.load(Ordering::Relaxed),
            unresolved: self.unresolved.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        self.invocations.store(0, Ordering::Relaxed);
        self.unresolved.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
    }
}
