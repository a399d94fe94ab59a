//! Resolution audit-log repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{Resolution, ResolutionQuery};

/// Repository trait for the append-only resolution audit log.
///
/// Records are written once per resolution attempt and never mutated or
/// deleted by the optimizer.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ResolutionRepository: Send + Sync {
    /// Append one resolution record.
    ///
    /// # Arguments
    /// * `resolution` - The record to append (id is assigned by the store)
    ///
    /// # Returns
    /// * `Ok(Resolution)` - The stored record including its assigned id
    /// * `Err(RepositoryError)` - If the operation fails
    async fn append_resolution(&self, resolution: &Resolution) -> RepositoryResult<Resolution>;

    /// List resolution records matching the query, newest first.
    ///
    /// # Arguments
    /// * `query` - Optional conflict-kind and status filters
    async fn list_resolutions(&self, query: &ResolutionQuery)
        -> RepositoryResult<Vec<Resolution>>;
}
