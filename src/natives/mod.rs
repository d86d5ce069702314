/*!
 * Native Functions
 * Invocation marshalling, handler registry and block policy
 */

pub mod context;
pub mod invoke;
pub mod policy;
pub mod registry;
pub mod value;

pub use context::NativeContext;
pub use invoke::{NativeCallSite, NativeDispatcher};
pub use policy::{BlockRule, NativeBlockPolicy};
pub use registry::{NativeHandler, NativeHandlerRegistry, NativeNameHasher};
pub use value::{NativeArgs, NativeReturn, NativeValue, ScrVector, Vector3};
