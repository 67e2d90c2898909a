//! Dynamically loaded libVLC logging entry points.

use crate::{libvlc_instance_t, libvlc_log_cb, libvlc_log_t};
use libloading::{Library, Symbol};
use std::ffi::{c_char, c_uint, c_void};
use std::sync::Arc;
use thiserror::Error;

/// `libvlc_log_set(instance, handler, data)`
pub type LogSetFn =
    unsafe extern "C" fn(instance: *mut libvlc_instance_t, cb: libvlc_log_cb, data: *mut c_void);

/// `libvlc_log_unset(instance)`
///
/// libVLC guarantees that once this returns, no log callback invocation is
/// in flight or will start; teardown code orders frees after it.
pub type LogUnsetFn = unsafe extern "C" fn(instance: *mut libvlc_instance_t);

/// `libvlc_log_get_context(ctx, *module, *header, *line)`
pub type LogGetContextFn = unsafe extern "C" fn(
    ctx: *const libvlc_log_t,
    module: *mut *const c_char,
    header: *mut *const c_char,
    line: *mut c_uint,
);

/// Error resolving the libVLC logging symbols.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The shared library could not be loaded
    #[error("failed to load library: {0}")]
    LibraryLoad(String),

    /// The library loaded but a required symbol is missing
    #[error("symbol not found: {0}")]
    SymbolNotFound(String),
}

#[cfg(target_os = "windows")]
const LIBVLC_LIBRARY: &str = "libvlc.dll";
#[cfg(target_os = "macos")]
const LIBVLC_LIBRARY: &str = "libvlc.dylib";
#[cfg(all(unix, not(target_os = "macos")))]
const LIBVLC_LIBRARY: &str = "libvlc.so.5";

/// Function table for the libVLC logging subsystem.
///
/// Holds the three entry points the bridge needs. When loaded from a shared
/// library the table keeps the `Library` alive, so the function pointers in
/// any clone stay valid for as long as that clone exists.
#[derive(Clone)]
pub struct LoggingApi {
    /// `libvlc_log_set`
    pub log_set: LogSetFn,
    /// `libvlc_log_unset`
    pub log_unset: LogUnsetFn,
    /// `libvlc_log_get_context`
    pub log_get_context: LogGetContextFn,
    _library: Option<Arc<Library>>,
}

impl LoggingApi {
    /// Loads libVLC by its platform-default library name.
    pub fn load() -> Result<Self, LoadError> {
        Self::load_from(LIBVLC_LIBRARY)
    }

    /// Loads libVLC from an explicit path or library name.
    pub fn load_from(path: &str) -> Result<Self, LoadError> {
        // SAFETY: loading a shared library runs its initializers. The caller
        // is responsible for pointing at a trusted libVLC build.
        let library = unsafe { Library::new(path) }
            .map_err(|e| LoadError::LibraryLoad(format!("{}: {}", path, e)))?;

        // SAFETY: symbol lookup by name; signatures match libVLC 3.x/4.x.
        let log_set: Symbol<LogSetFn> = unsafe { library.get(b"libvlc_log_set\0") }
            .map_err(|e| LoadError::SymbolNotFound(format!("libvlc_log_set: {}", e)))?;

        let log_unset: Symbol<LogUnsetFn> = unsafe { library.get(b"libvlc_log_unset\0") }
            .map_err(|e| LoadError::SymbolNotFound(format!("libvlc_log_unset: {}", e)))?;

        let log_get_context: Symbol<LogGetContextFn> =
            unsafe { library.get(b"libvlc_log_get_context\0") }
                .map_err(|e| LoadError::SymbolNotFound(format!("libvlc_log_get_context: {}", e)))?;

        // Copy the function pointers out of the symbols; the Arc<Library>
        // keeps them valid past this scope.
        Ok(Self {
            log_set: *log_set,
            log_unset: *log_unset,
            log_get_context: *log_get_context,
            _library: Some(Arc::new(library)),
        })
    }

    /// Builds a table from already-resolved function pointers.
    ///
    /// For statically linked libVLC builds and for tests; the caller keeps
    /// the symbols valid for as long as the table (or any clone) is used.
    pub fn from_raw(
        log_set: LogSetFn,
        log_unset: LogUnsetFn,
        log_get_context: LogGetContextFn,
    ) -> Self {
        Self {
            log_set,
            log_unset,
            log_get_context,
            _library: None,
        }
    }
}

#[cfg(test)]
#[path = "api/api_tests.rs"]
mod api_tests;
