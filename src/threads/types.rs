/*!
 * Script Thread Types
 * Interface to the external thread execution engine
 */

use crate::core::errors::ThreadResult;
use crate::core::types::ThreadId;
use parking_lot::Mutex;
use std::sync::Arc;

/// A unit of guest script execution
///
/// The registry only assigns ids and starts threads; fetching and executing
/// bytecode belongs to the implementor.
pub trait ScriptThread: Send {
    /// Script name (for logging)
    fn name(&self) -> &str;

    /// Begin execution under the assigned id
    fn start(&mut self, id: ThreadId) -> ThreadResult<()>;

    /// Stop execution; called when the thread leaves the registry
    fn kill(&mut self) {}
}

/// Shared handle to a registered thread
pub type ThreadHandle = Arc<Mutex<Box<dyn ScriptThread>>>;
