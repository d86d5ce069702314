/*!
 * Hooks
 * Observer points collaborators use to watch and gate the script system
 */

pub mod events;
pub mod listeners;

pub use events::{NativeAllowance, ScriptHooks};
pub use listeners::{BroadcastReport, EventListeners, Listener};
