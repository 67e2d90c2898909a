//! vlcbridge-sys - Raw libVLC logging surface
//!
//! This crate declares the minimal subset of the libVLC C API that the log
//! bridge needs:
//! - Opaque handle types ([`libvlc_instance_t`], [`libvlc_log_t`])
//! - The variadic log callback signature ([`libvlc_log_cb`])
//! - A dynamically loaded function table ([`LoggingApi`])
//! - The `vsnprintf`-backed message formatter ([`format_message`])
//!
//! No symbol here is linked at build time; [`LoggingApi`] resolves the three
//! logging entry points from the libVLC shared library at runtime, so the
//! crate builds and tests without libVLC installed.

#![allow(non_camel_case_types)]

mod api;
mod fmt;

pub use api::{LoadError, LogGetContextFn, LogSetFn, LogUnsetFn, LoggingApi};
pub use fmt::{LOG_MESSAGE_CAPACITY, format_message, message_bytes};

use std::ffi::{c_char, c_int, c_void};

/// Opaque libVLC runtime instance (`libvlc_instance_t`).
///
/// Created and destroyed outside this crate; the bridge only ever passes the
/// pointer back to libVLC.
#[repr(C)]
pub struct libvlc_instance_t {
    _unused: [u8; 0],
}

/// Opaque log record (`libvlc_log_t`) describing one log event's source
/// context (module, header, line). Only readable through
/// `libvlc_log_get_context`.
#[repr(C)]
pub struct libvlc_log_t {
    _unused: [u8; 0],
}

/// `va_list` as it crosses the callback boundary.
///
/// When a C `va_list` is passed as a function argument it degrades to a
/// pointer on the supported targets (SysV x86_64/aarch64 pass a pointer to
/// the register-save area, Windows uses `char *` outright), so a single
/// pointer typedef is sufficient to hand the value on to `vsnprintf`.
pub type va_list = *mut c_char;

/// Debug message (`LIBVLC_DEBUG`).
pub const LIBVLC_DEBUG: c_int = 0;
/// Important informational message (`LIBVLC_NOTICE`).
pub const LIBVLC_NOTICE: c_int = 2;
/// Warning message (`LIBVLC_WARNING`).
pub const LIBVLC_WARNING: c_int = 3;
/// Error message (`LIBVLC_ERROR`).
pub const LIBVLC_ERROR: c_int = 4;

/// Variadic log handler registered through `libvlc_log_set`.
///
/// # Parameters
/// - `data`: opaque per-registration state supplied at registration
/// - `level`: severity value (`LIBVLC_DEBUG` .. `LIBVLC_ERROR`)
/// - `ctx`: opaque log record for `libvlc_log_get_context`
/// - `fmt`: printf-style format string
/// - `args`: variadic arguments matching `fmt`
///
/// # Safety
/// libVLC may invoke the handler from any of its worker threads; `fmt` and
/// `args` are only valid for the duration of the call.
pub type libvlc_log_cb = unsafe extern "C" fn(
    data: *mut c_void,
    level: c_int,
    ctx: *const libvlc_log_t,
    fmt: *const c_char,
    args: va_list,
);
