/*!
 * Native Handler Registry
 * Maps native hashes to their handlers
 */

use super::context::NativeContext;
use crate::core::types::NativeHash;
use ahash::RandomState;
use dashmap::DashMap;
use log::{debug, info};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Native handler callback type
///
/// Handlers receive the packed context and write their result back into it.
pub type NativeHandler = Arc<dyn Fn(&mut NativeContext) + Send + Sync>;

/// Maps human-readable native names into the hash space
///
/// The algorithm belongs to the host; the registry only calls it.
pub trait NativeNameHasher: Send + Sync {
    fn hash_native_name(&self, name: &str) -> NativeHash;
}

impl<F> NativeNameHasher for F
where
    F: Fn(&str) -> NativeHash + Send + Sync,
{
    fn hash_native_name(&self, name: &str) -> NativeHash {
        self(name)
    }
}

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Registry of native handlers keyed by hash
///
/// Cloning is cheap and clones share the same table. Every registration bumps
/// a generation counter so cached resolutions can tell when to look again.
#[derive(Clone)]
pub struct NativeHandlerRegistry {
    id: u64,
    handlers: Arc<DashMap<NativeHash, NativeHandler, RandomState>>,
    generation: Arc<AtomicU64>,
    hasher: Option<Arc<dyn NativeNameHasher>>,
}

impl NativeHandlerRegistry {
    pub fn new() -> Self {
        Self {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            handlers: Arc::new(DashMap::with_hasher(RandomState::new())),
            generation: Arc::new(AtomicU64::new(0)),
            hasher: None,
        }
    }

    /// Attach the collaborator used by [`Self::register_named`]
    #[must_use]
    pub fn with_name_hasher(mut self, hasher: Arc<dyn NativeNameHasher>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    /// Install or replace the handler for `hash`
    ///
    /// Returns true when an existing handler was replaced.
    pub fn register<F>(&self, hash: NativeHash, handler: F) -> bool
    where
        F: Fn(&mut NativeContext) + Send + Sync + 'static,
    {
        self.register_handler(hash, Arc::new(handler))
    }

    /// Install or replace an already shared handler
    pub fn register_handler(&self, hash: NativeHash, handler: NativeHandler) -> bool {
        let replaced = self.handlers.insert(hash, handler).is_some();
        self.generation.fetch_add(1, Ordering::Release);

        if replaced {
            info!("Replaced native handler {:#018x}", hash);
        } else {
            debug!("Registered native handler {:#018x}", hash);
        }
        replaced
    }

    /// Hash `name` with the configured hasher and register under the result
    ///
    /// Returns `None` when no hasher is configured.
    pub fn register_named<F>(&self, name: &str, handler: F) -> Option<NativeHash>
    where
        F: Fn(&mut NativeContext) + Send + Sync + 'static,
    {
        let hash = self.hash_name(name)?;
        debug!("Native {} resolves to {:#018x}", name, hash);
        self.register(hash, handler);
        Some(hash)
    }

    /// Hash a name without registering anything
    pub fn hash_name(&self, name: &str) -> Option<NativeHash> {
        self.hasher.as_ref().map(|h| h.hash_native_name(name))
    }

    /// Resolve a hash to its handler
    ///
    /// A miss is not an error: callers skip the invocation.
    #[inline]
    pub fn lookup(&self, hash: NativeHash) -> Option<NativeHandler> {
        self.handlers.get(&hash).map(|entry| Arc::clone(entry.value()))
    }

    #[inline]
    pub fn contains(&self, hash: NativeHash) -> bool {
        self.handlers.contains_key(&hash)
    }

    /// All registered hashes, sorted ascending
    pub fn identifiers(&self) -> Vec<NativeHash> {
        let mut ids: Vec<NativeHash> = self.handlers.iter().map(|e| *e.key()).collect();
        ids.sort_unstable();
        ids
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Number of registrations performed so far
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Identity shared by all clones of this registry
    #[inline]
    pub fn registry_id(&self) -> u64 {
        self.id
    }
}

impl Default for NativeHandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NativeHandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeHandlerRegistry")
            .field("id", &self.id)
            .field("handlers", &self.handlers.len())
            .field("generation", &self.generation())
            .field("has_hasher", &self.hasher.is_some())
            .finish()
    }
}
