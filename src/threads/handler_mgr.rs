/*!
 * Script Handler Manager
 * Host-side collaborator told when scripts attach to and detach from threads
 */

use crate::core::errors::{ThreadError, ThreadResult};
use crate::core::types::ThreadId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Manager operations whose contract is not known
///
/// They exist so an implementation can occupy the same positions as the
/// host's manager; calling one that was not overridden fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservedSlot {
    M1,
    M2,
    M3,
    M4,
    M5,
    M6,
    M7,
    M8,
    M9,
}

impl ReservedSlot {
    pub const ALL: [ReservedSlot; 9] = [
        Self::M1,
        Self::M2,
        Self::M3,
        Self::M4,
        Self::M5,
        Self::M6,
        Self::M7,
        Self::M8,
        Self::M9,
    ];

    /// Position in the manager, 1 through 9
    pub const fn index(self) -> u8 {
        match self {
            Self::M1 => 1,
            Self::M2 => 2,
            Self::M3 => 3,
            Self::M4 => 4,
            Self::M5 => 5,
            Self::M6 => 6,
            Self::M7 => 7,
            Self::M8 => 8,
            Self::M9 => 9,
        }
    }
}

impl fmt::Display for ReservedSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.index())
    }
}

/// Notified as scripts bind to threads
pub trait ScriptHandlerManager: Send + Sync {
    fn attach_script(&self, thread: ThreadId);

    fn detach_script(&self, thread: ThreadId);

    fn invoke_reserved(&self, slot: ReservedSlot) -> ThreadResult<()> {
        Err(ThreadError::UnsupportedSlot(slot))
    }
}

/// Manager that ignores every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHandlerManager;

impl ScriptHandlerManager for NoopHandlerManager {
    fn attach_script(&self, _thread: ThreadId) {}

    fn detach_script(&self, _thread: ThreadId) {}
}
