/*!
 * Monitoring
 * Tracing setup and dispatch statistics
 */

pub mod stats;
pub mod tracer;

pub use stats::{DispatchStats, DispatchStatsSnapshot};
pub use tracer::{init_tracing, InvocationSpan};
