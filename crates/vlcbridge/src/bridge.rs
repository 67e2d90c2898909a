//! Installing and uninstalling the log bridge.

use crate::context::{LogContext, LogHandler};
use crate::error::BridgeResult;
use crate::level::Level;
use crate::registry::{BridgeRegistry, Registration};
use crate::trampoline;
use std::ffi::c_void;
use std::mem;
use std::ptr::NonNull;
use std::sync::Arc;
use vlcbridge_sys::{LoggingApi, libvlc_instance_t};

/// A live libVLC runtime instance.
///
/// The bridge never creates or destroys instances; callers obtain the
/// pointer from whatever wraps `libvlc_new` and promise it outlives every
/// bridge installed on it.
#[derive(Clone, Copy)]
pub struct Instance {
    raw: NonNull<libvlc_instance_t>,
}

impl Instance {
    /// Wraps a raw instance pointer.
    ///
    /// # Safety
    /// `raw` must point to a live `libvlc_instance_t` that outlives every
    /// bridge installed on it.
    pub unsafe fn from_raw(raw: *mut libvlc_instance_t) -> BridgeResult<Self> {
        NonNull::new(raw)
            .map(|raw| Self { raw })
            .ok_or(crate::error::BridgeError::NullInstance)
    }

    pub fn as_ptr(&self) -> *mut libvlc_instance_t {
        self.raw.as_ptr()
    }
}

// libVLC instances are thread-safe; the wrapper never dereferences the
// pointer.
unsafe impl Send for Instance {}
unsafe impl Sync for Instance {}

/// Entry point for installing log bridges on libVLC instances.
pub struct LogBridge {
    api: LoggingApi,
}

impl LogBridge {
    /// Loads libVLC by its platform-default library name.
    pub fn load() -> BridgeResult<Self> {
        Ok(Self {
            api: LoggingApi::load()?,
        })
    }

    /// Loads libVLC from an explicit path or library name.
    pub fn load_from(path: &str) -> BridgeResult<Self> {
        Ok(Self {
            api: LoggingApi::load_from(path)?,
        })
    }

    /// Uses an already-resolved function table.
    pub fn with_api(api: LoggingApi) -> Self {
        Self { api }
    }

    /// Routes every log event of `instance` through `handler`.
    ///
    /// Messages arrive fully formatted; no variadic arguments reach the
    /// handler. At most one bridge can be installed per instance; a second
    /// install fails with [`BridgeError::AlreadyInstalled`] until the first
    /// subscription is uninstalled.
    ///
    /// [`BridgeError::AlreadyInstalled`]: crate::BridgeError::AlreadyInstalled
    pub fn install<H: LogHandler>(
        &self,
        instance: Instance,
        handler: H,
    ) -> BridgeResult<LogSubscription> {
        self.install_context(instance, Box::new(handler), None)
    }

    /// Like [`install`](Self::install), but drops events below `min_level`
    /// before they reach the handler.
    pub fn install_filtered<H: LogHandler>(
        &self,
        instance: Instance,
        min_level: Level,
        handler: H,
    ) -> BridgeResult<LogSubscription> {
        self.install_context(instance, Box::new(handler), Some(min_level))
    }

    fn install_context(
        &self,
        instance: Instance,
        handler: Box<dyn LogHandler>,
        min_level: Option<Level>,
    ) -> BridgeResult<LogSubscription> {
        let context = Arc::new(LogContext::new(
            handler,
            self.api.log_get_context,
            min_level,
        ));

        let id = BridgeRegistry::global().insert(Registration {
            _context: Arc::clone(&context),
            instance: instance.as_ptr(),
            api: self.api.clone(),
        })?;

        // The registry entry owns the context; libVLC only borrows it.
        let data = Arc::as_ptr(&context) as *mut c_void;
        // SAFETY: instance is live per the Instance contract and the
        // trampoline matches libvlc_log_cb.
        unsafe { (self.api.log_set)(instance.as_ptr(), trampoline::log_event, data) };

        tracing::debug!(id, "log bridge installed");
        Ok(LogSubscription { id })
    }
}

/// Move-only token for one installed bridge.
///
/// Uninstalling consumes the token, so a registration cannot be torn down
/// twice; dropping the token uninstalls as well.
#[must_use = "dropping the subscription uninstalls the log bridge"]
pub struct LogSubscription {
    id: u64,
}

impl LogSubscription {
    /// The registration id, also usable as the C ABI handle.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Stops log delivery and releases the bridge state.
    pub fn uninstall(self) -> BridgeResult<()> {
        let id = self.id;
        mem::forget(self);
        teardown(id)
    }

    /// Detaches the RAII guard, leaving the registration live under its id.
    /// The C ABI install path hands the id to the host, which tears down
    /// through [`teardown`].
    pub(crate) fn into_raw(self) -> u64 {
        let id = self.id;
        mem::forget(self);
        id
    }
}

impl Drop for LogSubscription {
    fn drop(&mut self) {
        if let Err(error) = teardown(self.id) {
            tracing::warn!(id = self.id, "log bridge teardown on drop failed: {}", error);
        }
    }
}

/// Removes a registration and unregisters the handler from libVLC.
///
/// `libvlc_log_unset` returns only once no callback invocation is in
/// flight, so the context is dropped strictly after the last event has been
/// delivered.
pub(crate) fn teardown(id: u64) -> BridgeResult<()> {
    let registration = BridgeRegistry::global().remove(id)?;
    // SAFETY: the registration recorded a live instance and the api table
    // it was installed with.
    unsafe { (registration.api.log_unset)(registration.instance) };
    drop(registration);
    tracing::debug!(id, "log bridge uninstalled");
    Ok(())
}

#[cfg(test)]
#[path = "bridge/bridge_tests.rs"]
mod bridge_tests;
