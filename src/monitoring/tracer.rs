/*!
 * Structured Tracing
 * Subscriber setup and per-invocation spans using the tracing crate
 */

use crate::core::limits::ENV_TRACE_JSON;
use crate::core::types::NativeHash;
use std::time::Instant;
use tracing::{debug, span, Level, Span};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - SCRIPT_RUNTIME_TRACE_JSON: Enable JSON output (default: false)
///
/// `log` records are bridged into the subscriber. Calling this again after a
/// subscriber is installed does nothing.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(ENV_TRACE_JSON)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        tracing::info!(json = use_json, "Structured tracing initialized");
    }
}

/// Span covering one traced native invocation
pub struct InvocationSpan {
    span: Span,
    start: Instant,
}

impl InvocationSpan {
    pub fn new(hash: NativeHash, arg_count: usize) -> Self {
        let span = span!(
            Level::DEBUG,
            "native_invoke",
            hash = %format!("{:#018x}", hash),
            args = arg_count,
            resolved = tracing::field::Empty,
            duration_us = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
        }
    }

    /// Record whether a handler was found and close the span
    pub fn finish(self, resolved: bool) {
        let elapsed = self.start.elapsed();
        self.span.record("resolved", resolved);
        self.span.record("duration_us", elapsed.as_micros() as u64);

        let _entered = self.span.enter();
        if resolved {
            debug!("native invoked");
        } else {
            debug!("native not registered, invocation skipped");
        }
    }
}
