//! Callback slot registry.
//!
//! The host runtime installs a callable into each slot; the exported
//! trampolines in [`crate::ffi`] call through whatever is currently
//! installed. Each slot is an independent mutex-guarded `Option<fn>`, so
//! installing a callable is a single atomic publish and an invoke can never
//! observe a torn value. The lock is released before the callable runs,
//! which lets a callable re-enter the bridge without deadlocking.

use std::ffi::{c_char, c_int, c_void};

use log::debug;
use parking_lot::Mutex;

use crate::error::{BridgeError, Slot};
use crate::ffi_types::{
    InvokeInterface, ProtectFn, ReleaseObjectFn, ResolveProcessFn, ResultFn, TunInterface,
};

/// The four callback slots shared between the tunnel core and the host.
///
/// Invoke methods forward their arguments verbatim and return exactly what
/// the installed callable produced; the only behavior the registry adds is
/// turning an unset slot into [`BridgeError::NotRegistered`] instead of a
/// null function call.
pub struct CallbackRegistry {
    protect: Mutex<Option<ProtectFn>>,
    resolve_process: Mutex<Option<ResolveProcessFn>>,
    release_object: Mutex<Option<ReleaseObjectFn>>,
    result: Mutex<Option<ResultFn>>,
}

static CALLBACKS: CallbackRegistry = CallbackRegistry::new();

/// Process-wide registry used by the exported C entry points.
pub fn callbacks() -> &'static CallbackRegistry {
    &CALLBACKS
}

impl CallbackRegistry {
    /// Create a registry with all four slots unset.
    pub const fn new() -> Self {
        CallbackRegistry {
            protect: Mutex::new(None),
            resolve_process: Mutex::new(None),
            release_object: Mutex::new(None),
            result: Mutex::new(None),
        }
    }

    /// Install, replace, or clear (`None`) the protector callable.
    ///
    /// Returns the previously installed callable, if any.
    pub fn set_protect(&self, callable: Option<ProtectFn>) -> Option<ProtectFn> {
        let prev = std::mem::replace(&mut *self.protect.lock(), callable);
        log_slot_update(Slot::Protect, callable.is_some());
        prev
    }

    /// Install, replace, or clear (`None`) the process resolver callable.
    ///
    /// Returns the previously installed callable, if any.
    pub fn set_resolve_process(
        &self,
        callable: Option<ResolveProcessFn>,
    ) -> Option<ResolveProcessFn> {
        let prev = std::mem::replace(&mut *self.resolve_process.lock(), callable);
        log_slot_update(Slot::ResolveProcess, callable.is_some());
        prev
    }

    /// Install, replace, or clear (`None`) the release callable.
    ///
    /// Returns the previously installed callable, if any.
    pub fn set_release_object(&self, callable: Option<ReleaseObjectFn>) -> Option<ReleaseObjectFn> {
        let prev = std::mem::replace(&mut *self.release_object.lock(), callable);
        log_slot_update(Slot::ReleaseObject, callable.is_some());
        prev
    }

    /// Install, replace, or clear (`None`) the result callable.
    ///
    /// Returns the previously installed callable, if any.
    pub fn set_result(&self, callable: Option<ResultFn>) -> Option<ResultFn> {
        let prev = std::mem::replace(&mut *self.result.lock(), callable);
        log_slot_update(Slot::Result, callable.is_some());
        prev
    }

    /// Forward a socket descriptor to the installed protector.
    ///
    /// # Safety
    /// `tun_interface` and `fd` are forwarded without interpretation; they
    /// must satisfy whatever contract the installed callable expects.
    pub unsafe fn protect(
        &self,
        tun_interface: TunInterface,
        fd: c_int,
    ) -> Result<(), BridgeError> {
        let callable =
            (*self.protect.lock()).ok_or(BridgeError::NotRegistered(Slot::Protect))?;
        callable(tun_interface, fd);
        Ok(())
    }

    /// Ask the installed resolver which process owns a connection.
    ///
    /// On success the returned buffer is malloc-allocated by the callable
    /// and owned by the caller (release with
    /// [`crate::ffi::bridge_free_string`]). A NULL reply from the callable
    /// surfaces as [`BridgeError::CalleeFailed`].
    ///
    /// # Safety
    /// `source` and `target` must be valid null-terminated strings for the
    /// duration of the call; all arguments are forwarded without
    /// interpretation.
    pub unsafe fn resolve_process(
        &self,
        tun_interface: TunInterface,
        protocol: c_int,
        source: *const c_char,
        target: *const c_char,
        uid: c_int,
    ) -> Result<*mut c_char, BridgeError> {
        let callable = (*self.resolve_process.lock())
            .ok_or(BridgeError::NotRegistered(Slot::ResolveProcess))?;
        let reply = callable(tun_interface, protocol, source, target, uid);
        if reply.is_null() {
            Err(BridgeError::CalleeFailed(Slot::ResolveProcess))
        } else {
            Ok(reply)
        }
    }

    /// Tell the host the bridge is done with an object it handed out.
    ///
    /// # Safety
    /// `obj` is forwarded without interpretation; it must be a handle the
    /// installed callable knows how to release.
    pub unsafe fn release_object(&self, obj: *mut c_void) -> Result<(), BridgeError> {
        let callable =
            (*self.release_object.lock()).ok_or(BridgeError::NotRegistered(Slot::ReleaseObject))?;
        callable(obj);
        Ok(())
    }

    /// Deliver an invocation payload and collect the host's reply.
    ///
    /// Ownership of the returned buffer follows the same contract as
    /// [`CallbackRegistry::resolve_process`].
    ///
    /// # Safety
    /// `data` must be a valid null-terminated string for the duration of
    /// the call; all arguments are forwarded without interpretation.
    pub unsafe fn result(
        &self,
        invoke_interface: InvokeInterface,
        data: *const c_char,
    ) -> Result<*mut c_char, BridgeError> {
        let callable = (*self.result.lock()).ok_or(BridgeError::NotRegistered(Slot::Result))?;
        let reply = callable(invoke_interface, data);
        if reply.is_null() {
            Err(BridgeError::CalleeFailed(Slot::Result))
        } else {
            Ok(reply)
        }
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        CallbackRegistry::new()
    }
}

fn log_slot_update(slot: Slot, installed: bool) {
    debug!(
        "{}: callable {}",
        slot,
        if installed { "installed" } else { "cleared" }
    );
}
