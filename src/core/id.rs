/*!
 * ID Generation
 * Monotonic identifier generators for runtime entities
 */

use super::types::ThreadId;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Generic ID generator interface
pub trait IdGenerator<T> {
    /// Generate next ID
    fn next(&self) -> T;

    /// Peek at the ID the next call to `next` will return
    fn current(&self) -> T;
}

/// Lock-free monotonic counter
///
/// IDs are never recycled: once handed out, a value is never produced again
/// by the same generator (or any of its clones).
#[repr(C, align(64))]
pub struct AtomicGenerator<T> {
    counter: Arc<AtomicU64>,
    _marker: PhantomData<T>,
}

impl<T> AtomicGenerator<T> {
    /// Create new generator starting at given value
    #[inline]
    pub fn new(start: u64) -> Self {
        Self {
            counter: Arc::new(AtomicU64::new(start)),
            _marker: PhantomData,
        }
    }

    /// Create new generator starting at 1
    #[inline]
    pub fn default_start() -> Self {
        Self::new(1)
    }
}

impl<T> Clone for AtomicGenerator<T> {
    fn clone(&self) -> Self {
        Self {
            counter: Arc::clone(&self.counter),
            _marker: PhantomData,
        }
    }
}

impl<T> Default for AtomicGenerator<T> {
    fn default() -> Self {
        Self::default_start()
    }
}

impl IdGenerator<u64> for AtomicGenerator<u64> {
    #[inline]
    fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst)
    }

    #[inline]
    fn current(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}

/// Script thread ID generator
pub type ThreadIdGenerator = AtomicGenerator<ThreadId>;

/// Hook listener ID generator
pub type ListenerIdGenerator = AtomicGenerator<u64>;
