/*!
 * Runtime Limits and Constants
 *
 * Binary-level constants shared with native handlers. These are part of the
 * host calling convention and must not change.
 */

use super::types::ThreadId;

// =============================================================================
// INVOCATION BUFFER
// =============================================================================

/// Width of one argument/return slot in bytes
pub const ARG_SIZE: usize = 8;

/// Maximum number of arguments per invocation
pub const MAX_NATIVE_PARAMS: usize = 32;

/// Total size of the shared argument/return buffer (256 bytes)
pub const CONTEXT_BUFFER_SIZE: usize = ARG_SIZE * MAX_NATIVE_PARAMS;

/// Number of packed vectors a handler can stage for normalization
pub const MAX_VECTOR_RESULTS: usize = 4;

/// Slots occupied by one padded vector result (x, y, z each padded to a slot)
pub const VECTOR_RESULT_SLOTS: usize = 3;

// =============================================================================
// THREADS
// =============================================================================

/// First identifier handed out by the thread registry
pub const FIRST_THREAD_ID: ThreadId = 1;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Host build the block rules are evaluated against
pub const ENV_GAME_BUILD: &str = "SCRIPT_RUNTIME_GAME_BUILD";

/// Comma separated list of blocked native hashes
pub const ENV_BLOCKED_NATIVES: &str = "SCRIPT_RUNTIME_BLOCKED_NATIVES";

/// Enables per-invocation tracing spans
pub const ENV_TRACE_INVOCATIONS: &str = "SCRIPT_RUNTIME_TRACE_INVOCATIONS";

/// Switches the tracing subscriber to JSON output
pub const ENV_TRACE_JSON: &str = "SCRIPT_RUNTIME_TRACE_JSON";
