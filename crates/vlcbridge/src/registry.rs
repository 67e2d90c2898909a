//! Live registration tracking.
//!
//! Every installed bridge is an entry here, keyed by a non-zero id that
//! doubles as the opaque handle in the C ABI. The registry also claims the
//! instance pointer, enforcing at most one bridge per instance.

use crate::context::LogContext;
use crate::error::{BridgeError, BridgeResult};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use vlcbridge_sys::{LoggingApi, libvlc_instance_t};

/// Global bridge registry
static REGISTRY: OnceCell<BridgeRegistry> = OnceCell::new();

/// One live registration: the shared context plus everything teardown needs.
pub(crate) struct Registration {
    /// Never read back, but must stay alive: libVLC holds a raw pointer
    /// into this allocation until `libvlc_log_unset` returns
    pub(crate) _context: Arc<LogContext>,
    /// The instance the bridge is installed on
    pub(crate) instance: *mut libvlc_instance_t,
    /// Function table used for `libvlc_log_unset` at teardown
    pub(crate) api: LoggingApi,
}

// The registry moves registrations between threads whole and never
// dereferences the instance pointer itself.
unsafe impl Send for Registration {}
unsafe impl Sync for Registration {}

/// Tracks installed bridges
pub(crate) struct BridgeRegistry {
    registrations: DashMap<u64, Registration>,
    instances: DashMap<usize, u64>,
    next_id: AtomicU64,
}

impl BridgeRegistry {
    pub(crate) fn new() -> Self {
        Self {
            registrations: DashMap::new(),
            instances: DashMap::new(),
            // 0 is the C ABI failure value; ids start above it.
            next_id: AtomicU64::new(1),
        }
    }

    /// Get the global registry instance
    pub(crate) fn global() -> &'static BridgeRegistry {
        REGISTRY.get_or_init(BridgeRegistry::new)
    }

    /// Claims the registration's instance and stores it under a fresh id.
    ///
    /// Fails with [`BridgeError::AlreadyInstalled`] while the instance has a
    /// live bridge; the claim is atomic, so two racing installs on one
    /// instance resolve to a single winner.
    pub(crate) fn insert(&self, registration: Registration) -> BridgeResult<u64> {
        let key = registration.instance as usize;
        match self.instances.entry(key) {
            Entry::Occupied(_) => Err(BridgeError::AlreadyInstalled),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                slot.insert(id);
                self.registrations.insert(id, registration);
                Ok(id)
            }
        }
    }

    /// Removes and returns a registration; exactly one caller wins for a
    /// given id, so double-teardown surfaces as [`BridgeError::InvalidHandle`].
    pub(crate) fn remove(&self, id: u64) -> BridgeResult<Registration> {
        let (_, registration) = self
            .registrations
            .remove(&id)
            .ok_or(BridgeError::InvalidHandle(id))?;
        // The instance stays claimed until after the registration is gone,
        // so a racing install cannot double-register it.
        self.instances.remove(&(registration.instance as usize));
        Ok(registration)
    }

    #[cfg(test)]
    pub(crate) fn is_registered(&self, id: u64) -> bool {
        self.registrations.contains_key(&id)
    }
}

impl Default for BridgeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
