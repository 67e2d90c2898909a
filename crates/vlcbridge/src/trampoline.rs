//! The fixed-signature handler registered with libVLC.

use crate::context::LogContext;
use crate::panic_guard::catch_panic;
use std::ffi::{CStr, c_char, c_int, c_uint, c_void};
use std::ptr;
use vlcbridge_sys::{self as sys, libvlc_log_t, va_list};

/// Trampoline passed to `libvlc_log_set`.
///
/// Formats the variadic message into a per-invocation stack buffer, pulls
/// the module name out of the log record and forwards the event to the
/// stored handler. libVLC may call this concurrently from any number of its
/// worker threads; no state is shared between invocations and nothing is
/// retained past the call.
///
/// # Safety
/// `data` must point to a [`LogContext`] that stays alive for the duration
/// of the call, and `fmt`/`args` must be a valid printf pair. The install
/// path and libVLC's callback contract guarantee both.
pub(crate) unsafe extern "C" fn log_event(
    data: *mut c_void,
    level: c_int,
    record: *const libvlc_log_t,
    fmt: *const c_char,
    args: va_list,
) {
    // A handler panic must not unwind into libVLC.
    catch_panic((), || unsafe { log_event_impl(data, level, record, fmt, args) });
}

unsafe fn log_event_impl(
    data: *mut c_void,
    level: c_int,
    record: *const libvlc_log_t,
    fmt: *const c_char,
    args: va_list,
) {
    if data.is_null() {
        return;
    }
    // SAFETY: the registry keeps the context alive until libvlc_log_unset
    // has returned, and unset quiesces in-flight callbacks.
    let context = unsafe { &*(data as *const LogContext) };

    let mut buf = [0u8; sys::LOG_MESSAGE_CAPACITY];
    // SAFETY: fmt/args come straight from libVLC's logging core.
    let written = unsafe { sys::format_message(&mut buf, fmt, args) };
    let message = sys::message_bytes(&buf, written);

    let module_ptr = unsafe { module_name(context, record) };
    // SAFETY: the module string is owned by libVLC and valid for the
    // duration of the callback.
    let module = module_ptr.map(|p| unsafe { CStr::from_ptr(p) });

    context.dispatch(level, module, message);
}

/// Reads the module name out of the log record; header and line are
/// extracted as well but the simplified handler contract drops them.
unsafe fn module_name(context: &LogContext, record: *const libvlc_log_t) -> Option<*const c_char> {
    if record.is_null() {
        return None;
    }
    let mut module: *const c_char = ptr::null();
    let mut header: *const c_char = ptr::null();
    let mut line: c_uint = 0;
    // SAFETY: record is the opaque handle libVLC passed to this callback.
    unsafe { (context.log_get_context())(record, &mut module, &mut header, &mut line) };
    if module.is_null() { None } else { Some(module) }
}
