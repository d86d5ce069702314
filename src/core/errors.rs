/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{NativeHash, ThreadId};
use crate::threads::ReservedSlot;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Argument packing and result extraction errors
///
/// Every variant is a call-site contract violation. None of them are retried;
/// an invocation that produces one never reaches its handler.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum InvocationError {
    #[error("Argument of {size} bytes does not fit a {max}-byte slot")]
    #[diagnostic(
        code(invocation::oversized_argument),
        help("The call site passes a type wider than a slot. Pass it by pointer or split it.")
    )]
    OversizedArgument { size: usize, max: usize },

    #[error("Invocation already holds the maximum of {max} arguments")]
    #[diagnostic(
        code(invocation::too_many_arguments),
        help("Natives accept at most 32 slots of arguments.")
    )]
    TooManyArguments { max: usize },

    #[error("Result of {size} bytes exceeds the {capacity}-byte return buffer")]
    #[diagnostic(code(invocation::result_too_large))]
    ResultTooLarge { size: usize, capacity: usize },

    #[error("Slot {index} is out of range (argument count {count})")]
    #[diagnostic(code(invocation::slot_out_of_range))]
    SlotOutOfRange { index: usize, count: usize },

    #[error("Vector result space exhausted ({max} vectors)")]
    #[diagnostic(code(invocation::vector_space_exhausted))]
    VectorSpaceExhausted { max: usize },
}

/// Script thread errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ThreadError {
    #[error("Thread {id} failed to start: {reason}")]
    #[diagnostic(
        code(thread::start_failed),
        help("The execution engine rejected the thread. It was not registered.")
    )]
    StartFailed { id: ThreadId, reason: String },

    #[error("Thread {0} not found")]
    #[diagnostic(code(thread::not_found))]
    NotFound(ThreadId),

    #[error("Handler manager operation {0} is not supported")]
    #[diagnostic(code(thread::unsupported_slot))]
    UnsupportedSlot(ReservedSlot),
}

/// Lifecycle hook listener errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HookError {
    #[error("Listener failed: {0}")]
    ListenerFailed(String),
}

impl HookError {
    #[inline]
    pub fn listener_failed(reason: impl Into<String>) -> Self {
        Self::ListenerFailed(reason.into())
    }
}

/// Configuration loading errors
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    #[diagnostic(code(config::io))]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    #[diagnostic(code(config::parse), help("Configuration files are JSON documents."))]
    Parse(#[from] serde_json::Error),

    #[error("Invalid native hash {0:?}")]
    #[diagnostic(
        code(config::invalid_hash),
        help("Use a 0x-prefixed hexadecimal or a decimal 64-bit value.")
    )]
    InvalidHash(String),

    #[error("Invalid value for {key}: {value:?}")]
    #[diagnostic(code(config::invalid_value))]
    InvalidValue { key: String, value: String },
}

/// Unified runtime error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum RuntimeError {
    #[error("Invocation error: {0}")]
    #[diagnostic(transparent)]
    Invocation(#[from] InvocationError),

    #[error("Thread error: {0}")]
    #[diagnostic(transparent)]
    Thread(#[from] ThreadError),

    #[error("Hook error: {0}")]
    Hook(#[from] HookError),

    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Cannot register native {name:?} by name: no name hasher configured")]
    #[diagnostic(
        code(runtime::missing_name_hasher),
        help("Provide a hasher with ScriptRuntime::builder().with_name_hasher(..).")
    )]
    MissingNameHasher { name: String },

    #[error("Native {0:#018x} is not registered")]
    #[diagnostic(code(runtime::unknown_native))]
    UnknownNative(NativeHash),
}

pub type InvocationResult<T> = Result<T, InvocationError>;
pub type ThreadResult<T> = Result<T, ThreadError>;
pub type HookResult<T> = Result<T, HookError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type RuntimeResult<T> = Result<T, RuntimeError>;
