// ffi.rs - C FFI entry points for the callback bridge

//! The exported C surface of the bridge.
//!
//! Four trampoline entry points forward to whichever callable the host last
//! installed, four setters perform the installation, and
//! [`bridge_free_string`] implements the caller side of the returned-buffer
//! ownership contract. The trampoline names are fixed by the existing ABI;
//! the setters take over for the raw function-pointer globals the C layer
//! used to expose.
//!
//! Invoking a trampoline whose slot is unset is defined behavior: the void
//! entry points log a warning and return, the text entry points return NULL.

use std::ffi::{c_char, c_int, c_void};
use std::ptr;

use log::warn;

use crate::error::BridgeError;
use crate::ffi_types::{
    InvokeInterface, ProtectFn, ReleaseObjectFn, ResolveProcessFn, ResultFn, TunInterface,
};
use crate::registry::callbacks;

// =============================================================================
// Registration
// =============================================================================

/// Install, replace, or clear the protector callable. NULL clears.
#[no_mangle]
pub extern "C" fn set_protect_func(callable: Option<ProtectFn>) {
    callbacks().set_protect(callable);
}

/// Install, replace, or clear the process resolver callable. NULL clears.
#[no_mangle]
pub extern "C" fn set_resolve_process_func(callable: Option<ResolveProcessFn>) {
    callbacks().set_resolve_process(callable);
}

/// Install, replace, or clear the release callable. NULL clears.
#[no_mangle]
pub extern "C" fn set_release_object_func(callable: Option<ReleaseObjectFn>) {
    callbacks().set_release_object(callable);
}

/// Install, replace, or clear the result callable. NULL clears.
#[no_mangle]
pub extern "C" fn set_result_func(callable: Option<ResultFn>) {
    callbacks().set_result(callable);
}

// =============================================================================
// Trampolines
// =============================================================================

/// Exclude a socket descriptor from the tunnel.
///
/// Forwards `tun_interface` and `fd` verbatim to the installed protector.
/// No-op (with a logged warning) if no protector is installed.
///
/// # Safety
/// Arguments are forwarded without interpretation; they must satisfy
/// whatever contract the installed callable expects.
#[no_mangle]
pub unsafe extern "C" fn protect(tun_interface: TunInterface, fd: c_int) {
    if let Err(e) = callbacks().protect(tun_interface, fd) {
        warn!("protect: {}", e);
    }
}

/// Resolve the process behind a connection.
///
/// Forwards all five arguments verbatim to the installed resolver and
/// returns its reply unchanged. Returns NULL when no resolver is installed
/// (logged) or when the resolver itself produced no result.
///
/// The returned buffer is owned by the caller; release it with
/// [`bridge_free_string`].
///
/// # Safety
/// `source` and `target` must be NULL or valid null-terminated strings for
/// the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn resolve_process(
    tun_interface: TunInterface,
    protocol: c_int,
    source: *const c_char,
    target: *const c_char,
    uid: c_int,
) -> *mut c_char {
    match callbacks().resolve_process(tun_interface, protocol, source, target, uid) {
        Ok(reply) => reply,
        Err(e @ BridgeError::NotRegistered(_)) => {
            warn!("resolve_process: {}", e);
            ptr::null_mut()
        }
        // A null reply is the callable's way of saying "unknown"; pass it on
        Err(BridgeError::CalleeFailed(_)) => ptr::null_mut(),
    }
}

/// Signal that the bridge is done with a host object.
///
/// Forwards `obj` verbatim to the installed release callable. No-op (with a
/// logged warning) if none is installed.
///
/// # Safety
/// `obj` must be a handle the installed callable knows how to release.
#[no_mangle]
pub unsafe extern "C" fn release_object(obj: *mut c_void) {
    if let Err(e) = callbacks().release_object(obj) {
        warn!("release_object: {}", e);
    }
}

/// Deliver an invocation payload and return the host's reply.
///
/// Forwards both arguments verbatim to the installed result callable.
/// Returns NULL when no callable is installed (logged) or when the callable
/// produced no reply.
///
/// The returned buffer is owned by the caller; release it with
/// [`bridge_free_string`].
///
/// # Safety
/// `data` must be NULL or a valid null-terminated string for the duration
/// of the call.
#[no_mangle]
pub unsafe extern "C" fn result(invoke_interface: InvokeInterface, data: *const c_char) -> *mut c_char {
    match callbacks().result(invoke_interface, data) {
        Ok(reply) => reply,
        Err(e @ BridgeError::NotRegistered(_)) => {
            warn!("result: {}", e);
            ptr::null_mut()
        }
        Err(BridgeError::CalleeFailed(_)) => ptr::null_mut(),
    }
}

// =============================================================================
// Buffer ownership
// =============================================================================

/// Release a text buffer returned by [`resolve_process`] or [`result`].
///
/// Buffers handed back through the bridge are malloc-allocated by the
/// installed callable and owned by the caller after the trampoline returns.
/// NULL is accepted and ignored.
///
/// # Safety
/// `s` must be NULL or a buffer previously returned by a bridge trampoline
/// that has not already been freed.
#[no_mangle]
pub unsafe extern "C" fn bridge_free_string(s: *mut c_char) {
    if !s.is_null() {
        libc::free(s as *mut c_void);
    }
}
