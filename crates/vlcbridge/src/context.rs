//! Per-registration bridge state.

use crate::level::Level;
use std::ffi::{CStr, c_int};
use vlcbridge_sys as sys;

/// Receives bridged log events.
///
/// Implemented for any `Fn(Level, Option<&str>, &str)` closure. The handler
/// runs synchronously on whatever thread libVLC logged from, possibly on
/// several threads at once; forwarding into a single-threaded environment is
/// the handler's own hand-off to arrange.
pub trait LogHandler: Send + Sync + 'static {
    /// Called once per log event with the severity, the emitting module (if
    /// libVLC reported one) and the formatted message.
    fn on_log(&self, level: Level, module: Option<&str>, message: &str);
}

impl<F> LogHandler for F
where
    F: Fn(Level, Option<&str>, &str) + Send + Sync + 'static,
{
    fn on_log(&self, level: Level, module: Option<&str>, message: &str) {
        self(level, module, message)
    }
}

/// State shared between one registration and the trampoline.
///
/// libVLC borrows a raw pointer to this for as long as the bridge is
/// registered. The registry owns the allocation and keeps it alive until
/// `libvlc_log_unset` has returned, so a log call racing an uninstall never
/// reads freed state.
pub(crate) struct LogContext {
    handler: Box<dyn LogHandler>,
    log_get_context: sys::LogGetContextFn,
    min_level: Option<Level>,
}

impl LogContext {
    pub(crate) fn new(
        handler: Box<dyn LogHandler>,
        log_get_context: sys::LogGetContextFn,
        min_level: Option<Level>,
    ) -> Self {
        Self {
            handler,
            log_get_context,
            min_level,
        }
    }

    pub(crate) fn log_get_context(&self) -> sys::LogGetContextFn {
        self.log_get_context
    }

    /// Whether events of `level` pass the registration's filter.
    pub(crate) fn is_enabled(&self, level: Level) -> bool {
        self.min_level.is_none_or(|min| level >= min)
    }

    /// Converts one extracted event and forwards it to the handler.
    ///
    /// Module and message arrive as the C strings libVLC produced; both are
    /// converted lossily so a malformed byte never aborts delivery.
    pub(crate) fn dispatch(&self, level: c_int, module: Option<&CStr>, message: &[u8]) {
        let level = Level::from_raw(level);
        if !self.is_enabled(level) {
            return;
        }

        let module = module.map(|m| m.to_string_lossy());
        let message = String::from_utf8_lossy(message);
        self.handler.on_log(level, module.as_deref(), &message);
    }
}
