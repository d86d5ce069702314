/*!
 * Event Listener Lists
 * Ordered, removable listeners with failure isolation
 */

use crate::core::errors::HookResult;
use crate::core::id::{IdGenerator, ListenerIdGenerator};
use crate::core::types::ListenerId;
use log::{debug, warn};
use parking_lot::RwLock;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Listener callback type
pub type Listener<P> = Arc<dyn Fn(&mut P) -> HookResult<()> + Send + Sync>;

/// Outcome of one broadcast
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Listeners that ran
    pub invoked: usize,
    /// Listeners that returned an error or panicked
    pub failed: usize,
}

/// Listeners for one event, invoked in registration order
///
/// Broadcasts run against a snapshot taken when the broadcast starts, so a
/// listener may add or remove listeners; the change applies to the next one.
pub struct EventListeners<P> {
    event: &'static str,
    listeners: RwLock<Vec<(ListenerId, Listener<P>)>>,
    ids: ListenerIdGenerator,
}

impl<P> EventListeners<P> {
    pub fn new(event: &'static str) -> Self {
        Self {
            event,
            listeners: RwLock::new(Vec::new()),
            ids: ListenerIdGenerator::default_start(),
        }
    }

    /// Append a listener
    pub fn add<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&mut P) -> HookResult<()> + Send + Sync + 'static,
    {
        let id = self.ids.next();
        self.listeners.write().push((id, Arc::new(listener)));
        debug!("Added {} listener {}", self.event, id);
        id
    }

    /// Remove a listener; false if it was not registered
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        let removed = listeners.len() != before;
        if removed {
            debug!("Removed {} listener {}", self.event, id);
        }
        removed
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }

    /// Run every listener against `payload`
    ///
    /// A listener that errors or panics is logged and counted; the remaining
    /// listeners still run.
    pub fn broadcast(&self, payload: &mut P) -> BroadcastReport {
        let snapshot: Vec<(ListenerId, Listener<P>)> = self.listeners.read().clone();
        let mut report = BroadcastReport::default();

        for (id, listener) in snapshot {
            report.invoked += 1;
            match panic::catch_unwind(AssertUnwindSafe(|| listener(&mut *payload))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    report.failed += 1;
                    warn!("{} listener {} failed: {}", self.event, id, err);
                }
                Err(cause) => {
                    report.failed += 1;
                    warn!(
                        "{} listener {} panicked: {}",
                        self.event,
                        id,
                        panic_message(cause.as_ref())
                    );
                }
            }
        }

        report
    }
}

fn panic_message(cause: &(dyn Any + Send)) -> &str {
    if let Some(s) = cause.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = cause.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
