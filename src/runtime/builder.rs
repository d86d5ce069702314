/*!
 * Script Runtime Builder
 * Builder pattern for ScriptRuntime construction
 */

use super::config::RuntimeConfig;
use super::ScriptRuntime;
use crate::hooks::ScriptHooks;
use crate::natives::{NativeBlockPolicy, NativeDispatcher, NativeHandlerRegistry, NativeNameHasher};
use crate::threads::{ActiveThreadTracker, ScriptHandlerManager, ThreadRegistry};
use log::info;
use parking_lot::RwLock;
use std::sync::Arc;

/// Builder for ScriptRuntime
#[derive(Default)]
pub struct ScriptRuntimeBuilder {
    config: Option<RuntimeConfig>,
    registry: Option<NativeHandlerRegistry>,
    name_hasher: Option<Arc<dyn NativeNameHasher>>,
    handler_manager: Option<Arc<dyn ScriptHandlerManager>>,
}

impl ScriptRuntimeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Share an existing handler table instead of starting empty
    pub fn with_registry(mut self, registry: NativeHandlerRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Enable registration by name
    pub fn with_name_hasher<H>(mut self, hasher: H) -> Self
    where
        H: NativeNameHasher + 'static,
    {
        self.name_hasher = Some(Arc::new(hasher));
        self
    }

    /// Notify `manager` as threads are created and removed
    pub fn with_handler_manager<M>(mut self, manager: M) -> Self
    where
        M: ScriptHandlerManager + 'static,
    {
        self.handler_manager = Some(Arc::new(manager));
        self
    }

    pub fn build(self) -> ScriptRuntime {
        let config = self.config.unwrap_or_default();

        let mut registry = self.registry.unwrap_or_default();
        if let Some(hasher) = self.name_hasher {
            registry = registry.with_name_hasher(hasher);
        }

        let dispatcher = NativeDispatcher::new(registry).with_tracing(config.trace_invocations);
        let policy = NativeBlockPolicy::new(&config.blocked_natives, config.game_build);

        info!(
            "Script runtime built: build {:?}, {} blocked natives, tracing {}, handler manager {}",
            config.game_build,
            policy.len(),
            if config.trace_invocations { "on" } else { "off" },
            if self.handler_manager.is_some() { "attached" } else { "none" }
        );

        ScriptRuntime {
            config: RwLock::new(config),
            dispatcher,
            policy,
            hooks: ScriptHooks::new(),
            threads: ThreadRegistry::new(),
            active: ActiveThreadTracker::new(),
            handler_manager: self.handler_manager,
        }
    }
}
