//! Per-session mutual exclusion for resolution writes.
//!
//! Two resolutions touching the same session must not both probe
//! availability from a stale read and then write; the registry hands out
//! one async mutex per session id, held across probe + audit append +
//! mutation.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;

use crate::api::SessionId;

/// Registry of per-session locks.
///
/// The registry itself is cheap to share (`Arc`); locks are created lazily
/// on first use and live for the registry's lifetime.
#[derive(Default)]
pub struct SessionLockRegistry {
    locks: Mutex<HashMap<SessionId, Arc<AsyncMutex<()>>>>,
}

impl SessionLockRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Get the lock guarding `session_id`, creating it if needed.
    ///
    /// Callers hold the returned mutex for the duration of one resolution
    /// attempt against that session.
    pub fn lock_for(&self, session_id: SessionId) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock();
        locks.entry(session_id).or_default().clone()
    }

    /// Number of sessions with a registered lock.
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.lock().is_empty()
    }
}
