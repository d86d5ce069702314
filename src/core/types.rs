/*!
 * Core Types
 * Common types used across the runtime
 */

/// 64-bit identifier selecting a native function
pub type NativeHash = u64;

/// Script thread identifier
///
/// 64 bits wide so the generator cannot wrap and hand out an old id again.
pub type ThreadId = u64;

/// Listener identifier handed out by hook registration
pub type ListenerId = u64;

/// Host build number used to evaluate block rules
pub type GameBuild = u32;
