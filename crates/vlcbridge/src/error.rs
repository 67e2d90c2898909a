//! Error types for the log bridge.

use thiserror::Error;

/// Result type alias for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Error type for bridge operations
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The libVLC library or one of its logging symbols could not be loaded
    #[error(transparent)]
    Load(#[from] vlcbridge_sys::LoadError),

    /// The instance already has a live log bridge; uninstall it first
    #[error("a log bridge is already installed on this instance")]
    AlreadyInstalled,

    /// The handle does not refer to a live registration (unknown, or
    /// already uninstalled)
    #[error("invalid bridge handle: {0}")]
    InvalidHandle(u64),

    /// The supplied instance pointer was null
    #[error("libVLC instance pointer is null")]
    NullInstance,
}
