// tunbridge Rust library
// C ABI callback bridge between a tunnel core and its host runtime

pub mod error;
pub mod ffi;
pub mod ffi_types;
pub mod logging;
pub mod registry;

pub use error::{BridgeError, Slot};
pub use ffi_types::{
    InvokeInterface, ProtectFn, ReleaseObjectFn, ResolveProcessFn, ResultFn, TunInterface,
};
pub use logging::LogLevel;
pub use registry::{callbacks, CallbackRegistry};
