//! vlcbridge - pre-formatted libVLC log events for Rust
//!
//! libVLC reports log events through a variadic callback
//! (`libvlc_log_cb` takes a printf format string and a `va_list`), which
//! cannot be received on stable Rust. This crate bridges the gap:
//! - A fixed-signature trampoline is registered with `libvlc_log_set`
//! - Each message is formatted in C (`vsnprintf`) into a bounded buffer
//! - The module name is pulled out of the opaque log record
//! - A plain Rust [`LogHandler`] receives `(Level, Option<&str>, &str)`
//!
//! ## Quick Start
//!
//! ```ignore
//! use vlcbridge::{Instance, Level, LogBridge};
//!
//! let bridge = LogBridge::load()?;
//! let instance = unsafe { Instance::from_raw(raw_instance) }?;
//!
//! let subscription = bridge.install(instance, |level: Level, module, message| {
//!     eprintln!("[{}] {}: {}", level, module.unwrap_or("?"), message);
//! })?;
//!
//! // ... play media ...
//!
//! subscription.uninstall()?;
//! ```
//!
//! The subscription is a move-only token: uninstalling consumes it, and
//! dropping it tears the bridge down as well, so a registration can never
//! be released twice.
//!
//! # FFI Functions
//!
//! Hosts consuming the bridge through a C FFI use the exports with C
//! linkage instead:
//!
//! - `vlcbridge_load` - Resolve the libVLC logging symbols
//! - `vlcbridge_log_install` - Install a bridge, returns an opaque handle
//! - `vlcbridge_log_uninstall` - Tear a bridge down by handle

mod bridge;
mod context;
mod error;
mod exports;
mod forward;
mod level;
mod panic_guard;
mod registry;
mod trampoline;

pub use bridge::{Instance, LogBridge, LogSubscription};
pub use context::LogHandler;
pub use error::{BridgeError, BridgeResult};
pub use forward::TracingForwarder;
pub use level::Level;

// Re-export the FFI entry points for C hosts
pub use exports::{RawLogCallback, vlcbridge_load, vlcbridge_log_install, vlcbridge_log_uninstall};

// Re-export the raw surface embedders need to supply their own symbols
pub use vlcbridge_sys::{LoadError, LoggingApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BridgeError, BridgeResult, Instance, Level, LogBridge, LogHandler, LogSubscription,
        TracingForwarder,
    };
}
