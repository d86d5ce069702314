/*!
 * Active Thread Tracking
 * The thread currently executing, if any
 */

use crate::core::types::ThreadId;
use log::trace;
use parking_lot::RwLock;

/// Slot holding the id of the executing thread
///
/// Only the id is stored. An invocation already in flight keeps running
/// against the context it started with when the slot changes underneath it.
#[derive(Debug, Default)]
pub struct ActiveThreadTracker {
    current: RwLock<Option<ThreadId>>,
}

impl ActiveThreadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get_active(&self) -> Option<ThreadId> {
        *self.current.read()
    }

    /// Replace the active thread, returning the previous one
    pub fn set_active(&self, thread: Option<ThreadId>) -> Option<ThreadId> {
        let previous = std::mem::replace(&mut *self.current.write(), thread);
        trace!("Active thread {:?} -> {:?}", previous, thread);
        previous
    }

    /// Clear the slot if `thread` is the active one
    pub fn clear_if(&self, thread: ThreadId) -> bool {
        let mut current = self.current.write();
        if *current == Some(thread) {
            *current = None;
            true
        } else {
            false
        }
    }

    /// Mark `thread` active until the returned guard drops
    ///
    /// Guards nest: dropping one restores whatever was active before it.
    pub fn enter(&self, thread: ThreadId) -> ActiveThreadGuard<'_> {
        let previous = self.set_active(Some(thread));
        ActiveThreadGuard {
            tracker: self,
            thread,
            previous,
        }
    }
}

/// Restores the previously active thread on drop
#[must_use = "the thread is only active while the guard is alive"]
#[derive(Debug)]
pub struct ActiveThreadGuard<'a> {
    tracker: &'a ActiveThreadTracker,
    thread: ThreadId,
    previous: Option<ThreadId>,
}

impl ActiveThreadGuard<'_> {
    #[inline]
    pub fn thread(&self) -> ThreadId {
        self.thread
    }
}

impl Drop for ActiveThreadGuard<'_> {
    fn drop(&mut self) {
        self.tracker.set_active(self.previous);
    }
}
