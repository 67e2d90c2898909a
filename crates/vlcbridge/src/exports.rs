//! C ABI exported functions
//!
//! Hosts that consume the bridge through a C FFI rather than as a Rust
//! crate install with a fixed-signature callback and an opaque data
//! pointer, the classic `void *user_data` contract. Handles are plain
//! non-zero integers; 0 signals failure.

use crate::bridge::{Instance, LogBridge, teardown};
use crate::context::LogHandler;
use crate::level::Level;
use crate::panic_guard::catch_panic;
use parking_lot::RwLock;
use std::ffi::{CStr, CString, c_char, c_int, c_void};
use std::ptr;
use vlcbridge_sys::{LoggingApi, libvlc_instance_t};

/// Function table used by the C ABI install path, set by [`vlcbridge_load`].
static EXPORTED_API: RwLock<Option<LoggingApi>> = RwLock::new(None);

/// Fixed-argument callback invoked once per bridged log event.
///
/// # Parameters
/// - `data`: opaque pointer supplied at install time (may be null)
/// - `level`: libVLC severity value
/// - `module`: emitting module as a C string, or null when unknown
/// - `message`: formatted NUL-terminated message
///
/// # Safety
/// Invoked on whatever thread libVLC logged from; `module` and `message`
/// are only valid for the duration of the call.
pub type RawLogCallback = unsafe extern "C" fn(
    data: *mut c_void,
    level: c_int,
    module: *const c_char,
    message: *const c_char,
);

/// Adapter turning the raw callback/data pair into a [`LogHandler`].
struct RawCallbackHandler {
    callback: RawLogCallback,
    data: *mut c_void,
}

// The install contract requires the callback and data pointer to be usable
// from any thread libVLC logs on.
unsafe impl Send for RawCallbackHandler {}
unsafe impl Sync for RawCallbackHandler {}

impl LogHandler for RawCallbackHandler {
    fn on_log(&self, level: Level, module: Option<&str>, message: &str) {
        let module = match module.map(CString::new).transpose() {
            Ok(m) => m,
            Err(_) => return, // interior NUL cannot round-trip to C
        };
        let message = match CString::new(message) {
            Ok(m) => m,
            Err(_) => return,
        };
        let module_ptr = module.as_ref().map_or(ptr::null(), |m| m.as_ptr());
        // SAFETY: caller contract of vlcbridge_log_install.
        unsafe { (self.callback)(self.data, level.as_raw(), module_ptr, message.as_ptr()) };
    }
}

/// Resolves the libVLC logging symbols used by subsequent installs.
///
/// # Parameters
/// - `path`: library path or name; null selects the platform default
///
/// # Returns
/// true on success
///
/// # Safety
/// - `path`, when non-null, must be a valid NUL-terminated C string
/// - Loading a shared library runs its initializers
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vlcbridge_load(path: *const c_char) -> bool {
    catch_panic(false, || {
        let api = if path.is_null() {
            LoggingApi::load()
        } else {
            // SAFETY: caller guarantees path is a valid C string.
            let path = unsafe { CStr::from_ptr(path) }.to_string_lossy();
            LoggingApi::load_from(&path)
        };
        match api {
            Ok(api) => {
                *EXPORTED_API.write() = Some(api);
                true
            }
            Err(error) => {
                tracing::error!("failed to load libVLC: {}", error);
                false
            }
        }
    })
}

/// Installs a log bridge on `instance`, forwarding pre-formatted messages
/// to `callback`.
///
/// # Parameters
/// - `instance`: live libVLC instance
/// - `callback`: receiver for bridged events
/// - `data`: opaque pointer passed through to every callback invocation
///   (may be null)
///
/// # Returns
/// Non-zero handle for [`vlcbridge_log_uninstall`], or 0 on failure
///
/// # Safety
/// - `instance` must be a live `libvlc_instance_t` outliving the bridge
/// - `callback` must stay callable from any thread until uninstalled
/// - [`vlcbridge_load`] must have succeeded beforehand
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vlcbridge_log_install(
    instance: *mut libvlc_instance_t,
    callback: Option<RawLogCallback>,
    data: *mut c_void,
) -> u64 {
    catch_panic(0, || {
        let Some(callback) = callback else {
            tracing::error!("log bridge install rejected: callback is null");
            return 0;
        };
        let api = match &*EXPORTED_API.read() {
            Some(api) => api.clone(),
            None => {
                tracing::error!("log bridge install rejected: libVLC is not loaded");
                return 0;
            }
        };
        let instance = match unsafe { Instance::from_raw(instance) } {
            Ok(instance) => instance,
            Err(error) => {
                tracing::error!("log bridge install rejected: {}", error);
                return 0;
            }
        };

        let bridge = LogBridge::with_api(api);
        match bridge.install(instance, RawCallbackHandler { callback, data }) {
            Ok(subscription) => subscription.into_raw(),
            Err(error) => {
                tracing::error!("log bridge install failed: {}", error);
                0
            }
        }
    })
}

/// Uninstalls a bridge previously installed through
/// [`vlcbridge_log_install`] and releases its state.
///
/// # Returns
/// true on success; false when the handle is unknown or already
/// uninstalled (the double-free guard)
///
/// # Safety
/// The instance the bridge was installed on must still be alive.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn vlcbridge_log_uninstall(handle: u64) -> bool {
    catch_panic(false, || match teardown(handle) {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!("log bridge uninstall failed: {}", error);
            false
        }
    })
}
