/*!
 * Script Thread Registry
 * Owns registered threads and hands out their ids
 */

use super::types::{ScriptThread, ThreadHandle};
use crate::core::errors::ThreadResult;
use crate::core::id::{IdGenerator, ThreadIdGenerator};
use crate::core::limits::FIRST_THREAD_ID;
use crate::core::types::ThreadId;
use log::{info, warn};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

struct ThreadEntry {
    id: ThreadId,
    handle: ThreadHandle,
}

/// Ordered collection of script threads
///
/// Ids increase monotonically and are never reused, including ids of removed
/// threads and of threads that failed to start.
pub struct ThreadRegistry {
    threads: RwLock<Vec<ThreadEntry>>,
    ids: ThreadIdGenerator,
}

impl ThreadRegistry {
    pub fn new() -> Self {
        Self {
            threads: RwLock::new(Vec::new()),
            ids: ThreadIdGenerator::new(FIRST_THREAD_ID),
        }
    }

    /// Consume the next thread id
    #[inline]
    pub fn next_thread_id(&self) -> ThreadId {
        self.ids.next()
    }

    /// Take ownership of `thread`, assign it an id and start it
    ///
    /// A thread whose start fails is dropped, not registered.
    pub fn create_thread(&self, mut thread: Box<dyn ScriptThread>) -> ThreadResult<ThreadId> {
        let id = self.next_thread_id();

        if let Err(err) = thread.start(id) {
            warn!("Script thread {} ({}) failed to start: {}", id, thread.name(), err);
            return Err(err);
        }

        info!("Script thread {} ({}) started", id, thread.name());
        self.threads.write().push(ThreadEntry {
            id,
            handle: Arc::new(Mutex::new(thread)),
        });
        Ok(id)
    }

    /// Remove a thread, killing it if nobody holds its handle
    ///
    /// A thread whose handle is locked is running, possibly removing itself.
    /// It is unregistered without blocking and killing it is left to the
    /// holder of the lock.
    pub fn remove_thread(&self, id: ThreadId) -> Option<ThreadHandle> {
        let entry = {
            let mut threads = self.threads.write();
            let pos = threads.iter().position(|e| e.id == id)?;
            threads.remove(pos)
        };

        match entry.handle.try_lock() {
            Some(mut thread) => {
                thread.kill();
                info!("Script thread {} ({}) removed", id, thread.name());
            }
            None => info!("Script thread {} removed while running; kill left to its holder", id),
        }
        Some(entry.handle)
    }

    /// Run `f` only if `id` is registered, holding off removals until it returns
    pub fn with_registered<R>(&self, id: ThreadId, f: impl FnOnce() -> R) -> Option<R> {
        let threads = self.threads.read();
        threads.iter().any(|e| e.id == id).then(f)
    }

    pub fn get(&self, id: ThreadId) -> Option<ThreadHandle> {
        self.threads
            .read()
            .iter()
            .find(|e| e.id == id)
            .map(|e| Arc::clone(&e.handle))
    }

    #[inline]
    pub fn contains(&self, id: ThreadId) -> bool {
        self.threads.read().iter().any(|e| e.id == id)
    }

    /// Registered ids in registration order
    pub fn ids(&self) -> Vec<ThreadId> {
        self.threads.read().iter().map(|e| e.id).collect()
    }

    /// Snapshot of registered threads in registration order
    pub fn threads(&self) -> Vec<(ThreadId, ThreadHandle)> {
        self.threads
            .read()
            .iter()
            .map(|e| (e.id, Arc::clone(&e.handle)))
            .collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.threads.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.threads.read().is_empty()
    }
}

impl Default for ThreadRegistry {
    fn default() -> Self {
        Self::new()
    }
}
