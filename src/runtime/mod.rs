/*!
 * Script Runtime
 * Context object owning every piece of script system state
 *
 * Each runtime has its own handler table, block policy, hooks, thread
 * collection and active-thread slot; nothing is process-global, so independent
 * runtimes can coexist (one per test, for instance).
 */

pub mod builder;
pub mod config;

pub use builder::ScriptRuntimeBuilder;
pub use config::{parse_native_hash, RuntimeConfig};

use crate::core::errors::{InvocationResult, RuntimeError, RuntimeResult, ThreadError, ThreadResult};
use crate::core::types::{NativeHash, ThreadId};
use crate::hooks::{BroadcastReport, ScriptHooks};
use crate::natives::{
    BlockRule, NativeArgs, NativeBlockPolicy, NativeContext, NativeDispatcher, NativeHandler,
    NativeHandlerRegistry, NativeReturn,
};
use crate::threads::{
    ActiveThreadGuard, ActiveThreadTracker, ScriptHandlerManager, ScriptThread, ThreadHandle,
    ThreadRegistry,
};
use log::{debug, info};
use parking_lot::RwLock;
use std::sync::Arc;

/// Script system runtime
pub struct ScriptRuntime {
    config: RwLock<RuntimeConfig>,
    dispatcher: NativeDispatcher,
    policy: NativeBlockPolicy,
    hooks: ScriptHooks,
    threads: ThreadRegistry,
    active: ActiveThreadTracker,
    handler_manager: Option<Arc<dyn ScriptHandlerManager>>,
}

impl ScriptRuntime {
    /// Runtime with default configuration and no collaborators
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> ScriptRuntimeBuilder {
        ScriptRuntimeBuilder::new()
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> RuntimeConfig {
        self.config.read().clone()
    }

    /// Fire script-init listeners
    ///
    /// Only the first call broadcasts.
    pub fn init(&self) -> Option<BroadcastReport> {
        self.hooks.fire_script_init()
    }

    // Natives

    pub fn register_native<F>(&self, hash: NativeHash, handler: F) -> bool
    where
        F: Fn(&mut NativeContext) + Send + Sync + 'static,
    {
        self.dispatcher.registry().register(hash, handler)
    }

    pub fn register_native_by_name<F>(&self, name: &str, handler: F) -> RuntimeResult<NativeHash>
    where
        F: Fn(&mut NativeContext) + Send + Sync + 'static,
    {
        self.dispatcher
            .registry()
            .register_named(name, handler)
            .ok_or_else(|| RuntimeError::MissingNameHasher {
                name: name.to_string(),
            })
    }

    #[inline]
    pub fn native_handler(&self, hash: NativeHash) -> Option<NativeHandler> {
        self.dispatcher.registry().lookup(hash)
    }

    /// Like [`Self::native_handler`], for callers that need the native
    pub fn require_native(&self, hash: NativeHash) -> RuntimeResult<NativeHandler> {
        self.native_handler(hash)
            .ok_or(RuntimeError::UnknownNative(hash))
    }

    /// Invoke `hash`; block policy and hooks are not consulted
    pub fn invoke<R, A>(&self, hash: NativeHash, args: A) -> InvocationResult<R>
    where
        R: NativeReturn,
        A: NativeArgs,
    {
        self.dispatcher.invoke(hash, args)
    }

    #[inline]
    pub fn dispatcher(&self) -> &NativeDispatcher {
        &self.dispatcher
    }

    #[inline]
    pub fn registry(&self) -> &NativeHandlerRegistry {
        self.dispatcher.registry()
    }

    // Policy

    #[inline]
    pub fn should_block_native(&self, hash: NativeHash) -> bool {
        self.policy.should_block(hash)
    }

    pub fn blocked_natives(&self) -> Vec<NativeHash> {
        self.policy.blocked_natives()
    }

    /// Whether a gating call site should let `hash` through
    ///
    /// Blocked natives are denied without asking the hooks.
    pub fn is_native_allowed(&self, hash: NativeHash) -> bool {
        if self.policy.should_block(hash) {
            debug!("Native {:#018x} blocked by policy", hash);
            return false;
        }
        self.hooks.check_native_allowed(hash)
    }

    /// Replace the block rules, keeping the configured build
    pub fn reload_block_policy(&self, rules: Vec<BlockRule>) {
        let mut config = self.config.write();
        self.policy.reload(&rules, config.game_build);
        config.blocked_natives = rules;
    }

    #[inline]
    pub fn block_policy(&self) -> &NativeBlockPolicy {
        &self.policy
    }

    #[inline]
    pub fn hooks(&self) -> &ScriptHooks {
        &self.hooks
    }

    // Threads

    /// Register and start `thread`, then attach it to the handler manager
    pub fn create_thread(&self, thread: Box<dyn ScriptThread>) -> ThreadResult<ThreadId> {
        let id = self.threads.create_thread(thread)?;
        if let Some(manager) = &self.handler_manager {
            manager.attach_script(id);
        }
        Ok(id)
    }

    /// Remove `id`, detaching it and clearing the active slot if it pointed there
    ///
    /// Never waits on the thread's handle. When the handle is locked (the
    /// thread is running and may be removing itself) the holder kills it.
    pub fn remove_thread(&self, id: ThreadId) -> ThreadResult<ThreadHandle> {
        let handle = self
            .threads
            .remove_thread(id)
            .ok_or(ThreadError::NotFound(id))?;

        if self.active.clear_if(id) {
            info!("Removed thread {} was active; active slot cleared", id);
        }
        if let Some(manager) = &self.handler_manager {
            manager.detach_script(id);
        }
        Ok(handle)
    }

    #[inline]
    pub fn threads(&self) -> &ThreadRegistry {
        &self.threads
    }

    #[inline]
    pub fn next_thread_id(&self) -> ThreadId {
        self.threads.next_thread_id()
    }

    #[inline]
    pub fn active_thread_id(&self) -> Option<ThreadId> {
        self.active.get_active()
    }

    /// Handle of the active thread
    pub fn active_thread(&self) -> Option<ThreadHandle> {
        self.active.get_active().and_then(|id| self.threads.get(id))
    }

    /// Point the active slot at a registered thread, or clear it
    ///
    /// The registration check and the update happen under the registry lock,
    /// so a concurrent removal either sees the new value and clears it or
    /// makes this call fail.
    pub fn set_active_thread(&self, id: Option<ThreadId>) -> ThreadResult<Option<ThreadId>> {
        match id {
            Some(id) => self
                .threads
                .with_registered(id, || self.active.set_active(Some(id)))
                .ok_or(ThreadError::NotFound(id)),
            None => Ok(self.active.set_active(None)),
        }
    }

    /// Make `id` active until the guard drops
    pub fn enter_thread(&self, id: ThreadId) -> ThreadResult<ActiveThreadGuard<'_>> {
        self.threads
            .with_registered(id, || self.active.enter(id))
            .ok_or(ThreadError::NotFound(id))
    }

    #[inline]
    pub fn handler_manager(&self) -> Option<&Arc<dyn ScriptHandlerManager>> {
        self.handler_manager.as_ref()
    }
}

impl Default for ScriptRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ScriptRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptRuntime")
            .field("config", &*self.config.read())
            .field("dispatcher", &self.dispatcher)
            .field("policy", &self.policy)
            .field("threads", &self.threads.ids())
            .field("active", &self.active.get_active())
            .finish()
    }
}
