//! Forwarding bridged events into `tracing`.

use crate::context::LogHandler;
use crate::level::Level;

/// [`LogHandler`] that republishes libVLC log events as `tracing` events.
///
/// Severities map Debug→DEBUG, Notice→INFO, Warning→WARN, Error→ERROR; the
/// emitting module surfaces as the `module` field under the `vlc` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingForwarder;

impl TracingForwarder {
    pub fn new() -> Self {
        Self
    }
}

impl LogHandler for TracingForwarder {
    fn on_log(&self, level: Level, module: Option<&str>, message: &str) {
        let module = module.unwrap_or("unknown");
        match level {
            Level::Debug => tracing::debug!(target: "vlc", module, "{}", message),
            Level::Notice => tracing::info!(target: "vlc", module, "{}", message),
            Level::Warning => tracing::warn!(target: "vlc", module, "{}", message),
            Level::Error => tracing::error!(target: "vlc", module, "{}", message),
        }
    }
}
