/*!
 * Script Runtime Library
 * Native dispatch, thread registry and lifecycle hooks for an in-process script host
 */

pub mod core;
pub mod hooks;
pub mod monitoring;
pub mod natives;
pub mod runtime;
pub mod threads;

// Re-exports
pub use crate::core::errors::*;
pub use crate::core::types::{GameBuild, ListenerId, NativeHash, ThreadId};
pub use hooks::{BroadcastReport, NativeAllowance, ScriptHooks};
pub use monitoring::{init_tracing, DispatchStatsSnapshot};
pub use natives::{
    BlockRule, NativeArgs, NativeBlockPolicy, NativeCallSite, NativeContext, NativeDispatcher,
    NativeHandler, NativeHandlerRegistry, NativeNameHasher, NativeReturn, NativeValue, ScrVector,
    Vector3,
};
pub use runtime::{RuntimeConfig, ScriptRuntime, ScriptRuntimeBuilder};
pub use threads::{
    ActiveThreadGuard, ActiveThreadTracker, NoopHandlerManager, ReservedSlot,
    ScriptHandlerManager, ScriptThread, ThreadHandle, ThreadRegistry,
};
