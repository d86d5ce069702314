/*!
 * Script Threads
 * Thread registry, active-thread tracking and the handler manager interface
 */

pub mod active;
pub mod handler_mgr;
pub mod registry;
pub mod types;

pub use active::{ActiveThreadGuard, ActiveThreadTracker};
pub use handler_mgr::{NoopHandlerManager, ReservedSlot, ScriptHandlerManager};
pub use registry::ThreadRegistry;
pub use types::{ScriptThread, ThreadHandle};
