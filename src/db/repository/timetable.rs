//! Core timetable repository trait.
//!
//! This trait defines the session operations the conflict detector and
//! resolver consume: the full-session read, slot-keyed availability probes,
//! and the two single-field rewrites performed on successful resolutions.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{Session, SessionId, TeacherId, TeacherRef, TimeSlot};

/// Repository trait for scheduled class sessions.
///
/// Sessions are created and updated by the external scheduling CRUD
/// surface; the optimizer only reads them and, on a successful resolution,
/// rewrites the `hall` or `teacher` field of one session.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait TimetableRepository: Send + Sync {
    // ==================== Health & Connection ====================

    /// Check if the store connection is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if connection is healthy
    /// - `Ok(false)` if connection is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    // ==================== Session Operations ====================

    /// Store a new session.
    ///
    /// # Arguments
    /// * `session` - The session to store (id is assigned by the store)
    ///
    /// # Returns
    /// * `Ok(Session)` - The stored session including its assigned id
    /// * `Err(RepositoryError)` - If the operation fails
    async fn store_session(&self, session: &Session) -> RepositoryResult<Session>;

    /// Retrieve a single session by id.
    ///
    /// # Returns
    /// * `Ok(Session)` - The session
    /// * `Err(RepositoryError::NotFound)` - If the session doesn't exist
    async fn get_session(&self, session_id: SessionId) -> RepositoryResult<Session>;

    /// List every scheduled session, in store order.
    ///
    /// No date-range or term filter is applied here; filtering, if desired,
    /// is the caller's responsibility. The detector's chaining policy
    /// depends on this order being stable between calls.
    async fn list_sessions(&self) -> RepositoryResult<Vec<Session>>;

    // ==================== Availability Probes ====================

    /// Find a session occupying `hall` at exactly the given slot key.
    ///
    /// # Returns
    /// * `Ok(Some(Session))` - An occupant exists
    /// * `Ok(None)` - The hall is free at that slot
    async fn find_session_by_hall(
        &self,
        hall: &str,
        slot: &TimeSlot,
    ) -> RepositoryResult<Option<Session>>;

    /// Find a session taught by `teacher_id` at exactly the given slot key.
    ///
    /// # Returns
    /// * `Ok(Some(Session))` - The teacher is already booked
    /// * `Ok(None)` - The teacher is free at that slot
    async fn find_session_by_teacher(
        &self,
        teacher_id: TeacherId,
        slot: &TimeSlot,
    ) -> RepositoryResult<Option<Session>>;

    // ==================== Resolution Writes ====================

    /// Rewrite the hall of one session.
    ///
    /// # Returns
    /// * `Ok(Session)` - The session after the update
    /// * `Err(RepositoryError::NotFound)` - If the session doesn't exist
    async fn update_session_hall(
        &self,
        session_id: SessionId,
        hall: &str,
    ) -> RepositoryResult<Session>;

    /// Rewrite the teacher assignment of one session.
    ///
    /// # Returns
    /// * `Ok(Session)` - The session after the update
    /// * `Err(RepositoryError::NotFound)` - If the session doesn't exist
    async fn update_session_teacher(
        &self,
        session_id: SessionId,
        teacher: &TeacherRef,
    ) -> RepositoryResult<Session>;
}
