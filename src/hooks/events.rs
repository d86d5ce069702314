/*!
 * Script Lifecycle Hooks
 *
 * Two extension points for collaborators:
 *
 * - **script init**: fires once when the script system comes up
 * - **check native allowed**: asked before a gated native call; any listener
 *   can deny, and a denial sticks for the rest of the broadcast
 */

use super::listeners::{BroadcastReport, EventListeners};
use crate::core::errors::HookResult;
use crate::core::types::{ListenerId, NativeHash};
use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};

/// Allow/deny payload for the native allow-check
///
/// Starts out allowed. Listeners can only deny.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeAllowance {
    native: NativeHash,
    allowed: bool,
}

impl NativeAllowance {
    fn new(native: NativeHash) -> Self {
        Self {
            native,
            allowed: true,
        }
    }

    /// The native being checked
    #[inline]
    pub fn native(&self) -> NativeHash {
        self.native
    }

    #[inline]
    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    /// Veto the call
    #[inline]
    pub fn deny(&mut self) {
        self.allowed = false;
    }
}

/// Script system hook points
pub struct ScriptHooks {
    script_init: EventListeners<()>,
    check_native_allowed: EventListeners<NativeAllowance>,
    initialized: AtomicBool,
}

impl ScriptHooks {
    pub fn new() -> Self {
        Self {
            script_init: EventListeners::new("script-init"),
            check_native_allowed: EventListeners::new("check-native-allowed"),
            initialized: AtomicBool::new(false),
        }
    }

    /// Listen for script system initialization
    pub fn on_script_init<F>(&self, listener: F) -> ListenerId
    where
        F: Fn() -> HookResult<()> + Send + Sync + 'static,
    {
        self.script_init.add(move |_: &mut ()| listener())
    }

    pub fn remove_script_init_listener(&self, id: ListenerId) -> bool {
        self.script_init.remove(id)
    }

    /// Fire the init event
    ///
    /// Only the first call broadcasts; later calls return `None`.
    pub fn fire_script_init(&self) -> Option<BroadcastReport> {
        if self
            .initialized
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Script init already fired, ignoring");
            return None;
        }

        let report = self.script_init.broadcast(&mut ());
        info!(
            "Script init fired: {} listeners, {} failed",
            report.invoked, report.failed
        );
        Some(report)
    }

    #[inline]
    pub fn has_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Listen for native allow-checks
    pub fn on_check_native_allowed<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&mut NativeAllowance) -> HookResult<()> + Send + Sync + 'static,
    {
        self.check_native_allowed.add(listener)
    }

    pub fn remove_check_native_allowed_listener(&self, id: ListenerId) -> bool {
        self.check_native_allowed.remove(id)
    }

    /// Ask every listener whether `native` may run
    ///
    /// A listener that fails does not deny on its own.
    pub fn check_native_allowed(&self, native: NativeHash) -> bool {
        let mut allowance = NativeAllowance::new(native);
        self.check_native_allowed.broadcast(&mut allowance);
        if !allowance.is_allowed() {
            debug!("Native {:#018x} denied by allow-check listener", native);
        }
        allowance.is_allowed()
    }

    pub fn script_init_listeners(&self) -> usize {
        self.script_init.len()
    }

    pub fn check_native_allowed_listeners(&self) -> usize {
        self.check_native_allowed.len()
    }
}

impl Default for ScriptHooks {
    fn default() -> Self {
        Self::new()
    }
}
