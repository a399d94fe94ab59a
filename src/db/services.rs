//! High-level database service layer.
//!
//! This module provides repository-agnostic store operations that work with
//! any implementation of the repository traits. Cross-backend business
//! logic lives here — most importantly the session slot invariant (start
//! strictly before end), enforced before anything reaches a store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, CLI, scheduled job)       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - Business Logic           │
//! │  - Slot invariant validation                             │
//! │  - Bulk timetable import orchestration                   │
//! │  - Cross-cutting concerns                                │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │             Local Repository (in-memory)                 │
//! └─────────────────────────────────────────────────────────┘
//! ```

use log::info;

use super::repository::{
    ErrorContext, FullRepository, RepositoryError, RepositoryResult,
};
use crate::api::{
    Resolution, ResolutionQuery, Session, SessionId, Teacher, TeacherRef, TimetableDocument,
};

// ==================== Health & Connection ====================

/// Check if the store connection is healthy.
///
/// This is a simple pass-through to the repository's health check.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Session Operations ====================

/// Store a new session after validating the slot invariant.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `session` - The session to store
///
/// # Returns
/// * `Ok(Session)` - The stored session including its assigned id
/// * `Err(RepositoryError::ValidationError)` - If the time range is empty
///   or inverted
pub async fn store_session<R: FullRepository + ?Sized>(
    repo: &R,
    session: &Session,
) -> RepositoryResult<Session> {
    if !session.slot.is_valid() {
        return Err(RepositoryError::validation_with_context(
            format!(
                "Session start {} must precede end {}",
                session.slot.start, session.slot.end
            ),
            ErrorContext::new("store_session").with_entity("session"),
        ));
    }

    info!(
        "Service layer: storing session '{}' ({} in {} at {})",
        session.class_name, session.subject, session.hall, session.slot,
    );
    repo.store_session(session).await
}

/// List every scheduled session, in store order.
pub async fn list_sessions<R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<Session>> {
    repo.list_sessions().await
}

/// Retrieve a single session by id.
pub async fn get_session<R: FullRepository + ?Sized>(
    repo: &R,
    session_id: SessionId,
) -> RepositoryResult<Session> {
    repo.get_session(session_id).await
}

/// Rewrite the hall of one session.
pub async fn update_session_hall<R: FullRepository + ?Sized>(
    repo: &R,
    session_id: SessionId,
    hall: &str,
) -> RepositoryResult<Session> {
    info!(
        "Service layer: reassigning session {} to hall {}",
        session_id, hall
    );
    repo.update_session_hall(session_id, hall).await
}

/// Rewrite the teacher assignment of one session.
pub async fn update_session_teacher<R: FullRepository + ?Sized>(
    repo: &R,
    session_id: SessionId,
    teacher: &TeacherRef,
) -> RepositoryResult<Session> {
    info!(
        "Service layer: reassigning session {} to teacher {}",
        session_id, teacher.name
    );
    repo.update_session_teacher(session_id, teacher).await
}

// ==================== Teacher Operations ====================

/// Store a new teacher.
pub async fn store_teacher<R: FullRepository + ?Sized>(
    repo: &R,
    teacher: &Teacher,
) -> RepositoryResult<Teacher> {
    info!("Service layer: storing teacher '{}'", teacher.name);
    repo.store_teacher(teacher).await
}

/// List every teacher, in store order.
pub async fn list_teachers<R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<Teacher>> {
    repo.list_teachers().await
}

/// List teachers qualified to teach `subject`, in store order.
pub async fn list_teachers_by_subject<R: FullRepository + ?Sized>(
    repo: &R,
    subject: &str,
) -> RepositoryResult<Vec<Teacher>> {
    repo.list_teachers_by_subject(subject).await
}

// ==================== Bulk Import ====================

/// Store a parsed timetable document: teachers first, then sessions.
///
/// Each session goes through the same slot validation as
/// [`store_session`]; the first invalid session aborts the import.
///
/// # Returns
/// * `Ok((teachers_stored, sessions_stored))`
pub async fn import_timetable<R: FullRepository + ?Sized>(
    repo: &R,
    document: &TimetableDocument,
) -> RepositoryResult<(usize, usize)> {
    info!(
        "Service layer: importing timetable ({} teachers, {} sessions)",
        document.teachers.len(),
        document.sessions.len(),
    );

    for teacher in &document.teachers {
        repo.store_teacher(teacher).await?;
    }
    for session in &document.sessions {
        store_session(repo, session).await?;
    }

    Ok((document.teachers.len(), document.sessions.len()))
}

// ==================== Resolution Audit Log ====================

/// Append one resolution record to the audit log.
pub async fn append_resolution<R: FullRepository + ?Sized>(
    repo: &R,
    resolution: &Resolution,
) -> RepositoryResult<Resolution> {
    info!(
        "Service layer: recording {} resolution ({})",
        resolution.conflict_kind, resolution.status,
    );
    repo.append_resolution(resolution).await
}

/// List resolution records matching the query, newest first.
pub async fn list_resolutions<R: FullRepository + ?Sized>(
    repo: &R,
    query: &ResolutionQuery,
) -> RepositoryResult<Vec<Resolution>> {
    repo.list_resolutions(query).await
}
