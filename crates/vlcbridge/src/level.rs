//! Log severity levels reported by libVLC.

use std::ffi::c_int;
use vlcbridge_sys as sys;

/// Severity of a log event, as classified by libVLC.
///
/// The discriminants mirror libVLC's `libvlc_log_level` values, so ordering
/// comparisons express severity (`Level::Debug < Level::Error`).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Debug message
    Debug = 0,
    /// Important informational message
    Notice = 2,
    /// Warning (potential error) message
    Warning = 3,
    /// Error message
    Error = 4,
}

impl Level {
    /// Maps a raw libVLC severity value. Values libVLC does not define are
    /// treated as debug chatter rather than rejected.
    pub fn from_raw(value: c_int) -> Self {
        match value {
            sys::LIBVLC_NOTICE => Level::Notice,
            sys::LIBVLC_WARNING => Level::Warning,
            sys::LIBVLC_ERROR => Level::Error,
            _ => Level::Debug,
        }
    }

    /// The libVLC severity value for this level.
    pub fn as_raw(self) -> c_int {
        self as c_int
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Debug => write!(f, "DEBUG"),
            Level::Notice => write!(f, "NOTICE"),
            Level::Warning => write!(f, "WARNING"),
            Level::Error => write!(f, "ERROR"),
        }
    }
}
