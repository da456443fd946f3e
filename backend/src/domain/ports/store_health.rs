//! Port used by readiness probes to check the backing store.

use async_trait::async_trait;

/// Liveness check for the persistence backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Return `true` when the store answered a liveness check in time.
    async fn is_reachable(&self) -> bool;
}
