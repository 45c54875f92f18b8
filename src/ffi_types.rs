// FFI-compatible type definitions for the callback bridge
//
// These types mirror the C declarations in include/tunbridge.h and provide
// a stable ABI for interop between the tunnel core and the host runtime.

use std::ffi::{c_char, c_int, c_void};
use std::ptr;

/// Opaque handle to the host's tunnel interface object.
///
/// An address-sized token minted by the host runtime and forwarded verbatim
/// to the installed callables. The bridge never dereferences it.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TunInterface(*mut c_void);

impl TunInterface {
    /// Wrap a raw handle received from the host or the core.
    pub const fn from_raw(ptr: *mut c_void) -> Self {
        TunInterface(ptr)
    }

    /// Get the raw address for forwarding across the C boundary.
    pub const fn as_ptr(self) -> *mut c_void {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0.is_null()
    }

    pub const fn null() -> Self {
        TunInterface(ptr::null_mut())
    }
}

/// Opaque handle to the host object awaiting an invocation result.
///
/// Same pass-through contract as [`TunInterface`]; a separate type so the
/// two handle kinds cannot be swapped on the Rust side.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvokeInterface(*mut c_void);

impl InvokeInterface {
    pub const fn from_raw(ptr: *mut c_void) -> Self {
        InvokeInterface(ptr)
    }

    pub const fn as_ptr(self) -> *mut c_void {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0.is_null()
    }

    pub const fn null() -> Self {
        InvokeInterface(ptr::null_mut())
    }
}

/// C function pointer type for excluding a socket descriptor from the tunnel.
///
/// ```c
/// typedef void (*protect_func)(void *tun_interface, const int fd);
/// ```
pub type ProtectFn = unsafe extern "C" fn(TunInterface, c_int);

/// C function pointer type for resolving the process behind a connection.
///
/// Returns a malloc-allocated process identifier, or NULL when the host
/// cannot attribute the connection.
///
/// ```c
/// typedef char *(*resolve_process_func)(void *tun_interface, const int protocol,
///                                       const char *source, const char *target,
///                                       const int uid);
/// ```
pub type ResolveProcessFn =
    unsafe extern "C" fn(TunInterface, c_int, *const c_char, *const c_char, c_int) -> *mut c_char;

/// C function pointer type for releasing a host object the bridge no longer
/// needs.
///
/// ```c
/// typedef void (*release_object_func)(void *obj);
/// ```
pub type ReleaseObjectFn = unsafe extern "C" fn(*mut c_void);

/// C function pointer type for delivering an invocation payload and
/// collecting the host's reply.
///
/// Returns a malloc-allocated reply, or NULL on failure.
///
/// ```c
/// typedef char *(*result_func)(void *invoke_interface, const char *data);
/// ```
pub type ResultFn = unsafe extern "C" fn(InvokeInterface, *const c_char) -> *mut c_char;
