/*!
 * Native Invocation
 * Packs typed arguments, resolves the handler, runs it and extracts the result
 *
 * # Sequence
 *
 * 1. Build a fresh [`NativeContext`]
 * 2. Push every argument in order (any failure aborts before resolution)
 * 3. Resolve the handler
 * 4. No handler: skip the call and leave the return buffer zeroed
 * 5. Otherwise run the handler against the context
 * 6. Normalize staged vector results
 * 7. Extract the typed result (nothing for `()`)
 *
 * Block policy and allow-check hooks are queries for whoever gates the call;
 * nothing here consults them.
 */

use super::context::NativeContext;
use super::registry::{NativeHandler, NativeHandlerRegistry};
use super::value::{NativeArgs, NativeReturn};
use crate::core::errors::InvocationResult;
use crate::core::types::NativeHash;
use crate::monitoring::{DispatchStats, DispatchStatsSnapshot, InvocationSpan};
use log::warn;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Invocation front-end over a handler registry
#[derive(Clone)]
pub struct NativeDispatcher {
    registry: NativeHandlerRegistry,
    stats: Arc<DispatchStats>,
    trace: bool,
}

impl NativeDispatcher {
    pub fn new(registry: NativeHandlerRegistry) -> Self {
        Self {
            registry,
            stats: Arc::new(DispatchStats::new()),
            trace: false,
        }
    }

    /// Emit a tracing span for every invocation
    #[must_use]
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }

    #[inline]
    pub fn registry(&self) -> &NativeHandlerRegistry {
        &self.registry
    }

    pub fn stats(&self) -> DispatchStatsSnapshot {
        self.stats.snapshot()
    }

    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    /// Invoke `hash` with a fresh lookup
    pub fn invoke<R, A>(&self, hash: NativeHash, args: A) -> InvocationResult<R>
    where
        R: NativeReturn,
        A: NativeArgs,
    {
        let handler = self.registry.lookup(hash);
        self.dispatch(hash, handler.as_ref(), args, false)
    }

    /// Invoke `hash` with the packed arguments reversed before the call
    pub fn invoke_reversed<R, A>(&self, hash: NativeHash, args: A) -> InvocationResult<R>
    where
        R: NativeReturn,
        A: NativeArgs,
    {
        let handler = self.registry.lookup(hash);
        self.dispatch(hash, handler.as_ref(), args, true)
    }

    /// Run `hash` against a context the caller packed
    ///
    /// Returns whether a handler ran. Vector normalization happens either way.
    pub fn invoke_context(&self, hash: NativeHash, ctx: &mut NativeContext) -> bool {
        let handler = self.registry.lookup(hash);
        self.call(hash, handler.as_ref(), ctx)
    }

    pub(crate) fn dispatch<R, A>(
        &self,
        hash: NativeHash,
        handler: Option<&NativeHandler>,
        args: A,
        reverse: bool,
    ) -> InvocationResult<R>
    where
        R: NativeReturn,
        A: NativeArgs,
    {
        let mut ctx = NativeContext::new();
        if let Err(err) = args.push_all(&mut ctx) {
            self.stats.inc_rejected();
            warn!("Invocation of native {:#018x} aborted: {}", hash, err);
            return Err(err);
        }
        if reverse {
            ctx.reverse();
        }

        self.call(hash, handler, &mut ctx);

        R::extract(&ctx).inspect_err(|err| {
            self.stats.inc_rejected();
            warn!("Result of native {:#018x} unreadable: {}", hash, err);
        })
    }

    fn call(&self, hash: NativeHash, handler: Option<&NativeHandler>, ctx: &mut NativeContext) -> bool {
        let span = self
            .trace
            .then(|| InvocationSpan::new(hash, ctx.argument_count()));

        let resolved = match handler {
            Some(handler) => {
                handler(ctx);
                self.stats.inc_invocations();
                true
            }
            None => {
                self.stats.inc_unresolved();
                false
            }
        };

        ctx.set_vector_results();

        if let Some(span) = span {
            span.finish(resolved);
        }
        resolved
    }
}

impl fmt::Debug for NativeDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeDispatcher")
            .field("registry", &self.registry)
            .field("stats", &self.stats.snapshot())
            .field("trace", &self.trace)
            .finish()
    }
}

struct CachedResolution {
    registry_id: u64,
    generation: u64,
    handler: Option<NativeHandler>,
}

/// A fixed native hash with a cached handler resolution
///
/// The cache is reused while the registry's generation is unchanged, so a
/// handler registered (or replaced) later is picked up by the next call.
pub struct NativeCallSite {
    hash: NativeHash,
    cache: Mutex<Option<CachedResolution>>,
}

impl NativeCallSite {
    pub fn new(hash: NativeHash) -> Self {
        Self {
            hash,
            cache: Mutex::new(None),
        }
    }

    #[inline]
    pub fn hash(&self) -> NativeHash {
        self.hash
    }

    /// Resolve through the cache
    pub fn resolve(&self, registry: &NativeHandlerRegistry) -> Option<NativeHandler> {
        let generation = registry.generation();
        let mut cache = self.cache.lock();

        if let Some(cached) = cache.as_ref() {
            if cached.registry_id == registry.registry_id() && cached.generation == generation {
                return cached.handler.clone();
            }
        }

        let handler = registry.lookup(self.hash);
        *cache = Some(CachedResolution {
            registry_id: registry.registry_id(),
            generation,
            handler: handler.clone(),
        });
        handler
    }

    pub fn invoke<R, A>(&self, dispatcher: &NativeDispatcher, args: A) -> InvocationResult<R>
    where
        R: NativeReturn,
        A: NativeArgs,
    {
        let handler = self.resolve(dispatcher.registry());
        dispatcher.dispatch(self.hash, handler.as_ref(), args, false)
    }

    pub fn invoke_reversed<R, A>(&self, dispatcher: &NativeDispatcher, args: A) -> InvocationResult<R>
    where
        R: NativeReturn,
        A: NativeArgs,
    {
        let handler = self.resolve(dispatcher.registry());
        dispatcher.dispatch(self.hash, handler.as_ref(), args, true)
    }

    pub fn invoke_context(&self, dispatcher: &NativeDispatcher, ctx: &mut NativeContext) -> bool {
        let handler = self.resolve(dispatcher.registry());
        dispatcher.call(self.hash, handler.as_ref(), ctx)
    }
}

impl fmt::Debug for NativeCallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeCallSite")
            .field("hash", &format_args!("{:#018x}", self.hash))
            .finish()
    }
}
