//! Message formatting for the variadic log callback.
//!
//! The formatting itself stays in C: `vsnprintf` is the only portable way to
//! consume a `va_list`, and it is what libVLC's own text sinks use.

use crate::va_list;
use std::ffi::{c_char, c_int};

/// Formatting buffer capacity in bytes, including the NUL terminator.
///
/// Messages longer than `LOG_MESSAGE_CAPACITY - 1` bytes are truncated
/// silently; the truncated text is still delivered.
pub const LOG_MESSAGE_CAPACITY: usize = 1024;

unsafe extern "C" {
    fn vsnprintf(buf: *mut c_char, size: usize, fmt: *const c_char, args: va_list) -> c_int;
}

/// Formats a printf-style format string and `va_list` into `buf`.
///
/// Returns the byte length the full message would occupy (which may exceed
/// `buf.len() - 1` when truncated), or a negative value on encoding failure,
/// mirroring `vsnprintf`. On a non-negative return the buffer is
/// NUL-terminated.
///
/// # Safety
/// `fmt` must be a valid NUL-terminated C string and `args` a live `va_list`
/// matching its conversion specifiers. `args` may be null only when `fmt`
/// contains no conversion specifiers.
pub unsafe fn format_message(buf: &mut [u8], fmt: *const c_char, args: va_list) -> c_int {
    if buf.is_empty() || fmt.is_null() {
        return -1;
    }
    // SAFETY: buf is a live, writable allocation of buf.len() bytes and the
    // caller guarantees the fmt/args contract above.
    unsafe { vsnprintf(buf.as_mut_ptr() as *mut c_char, buf.len(), fmt, args) }
}

/// Extracts the formatted message bytes from `buf` after [`format_message`].
///
/// `written` is the `vsnprintf` return value. The usable portion is capped
/// at `buf.len() - 1` (the last byte is the NUL terminator); a negative
/// `written` yields an empty message.
pub fn message_bytes(buf: &[u8], written: c_int) -> &[u8] {
    if written < 0 || buf.is_empty() {
        return &[];
    }
    let len = (written as usize).min(buf.len() - 1);
    &buf[..len]
}
