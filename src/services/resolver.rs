//! Greedy, per-conflict repair of detected scheduling collisions.
//!
//! Each conflict gets exactly one resolution attempt: hall clashes search
//! the institution hall pool for a free room, teacher clashes search the
//! qualified-teacher list for a free substitute. Every attempt — successful
//! or not — appends exactly one audit record; on success the target
//! session's hall or teacher is rewritten in the store.
//!
//! The audit record is appended before the session mutation. If the
//! mutation then fails, [`OptimizerError::PartialResolution`] names the
//! session so the caller can retry that one conflict.

use chrono::Utc;
use serde_json::json;

use crate::api::{
    Conflict, ConflictKind, Resolution, ResolutionAction, ResolutionOutcome, ResolutionStatus,
    Session, SessionId, TeacherRef, TimeSlot,
};
use crate::db::repository::{FullRepository, RepositoryError};
use crate::services::optimizer::OptimizerConfig;
use crate::services::session_locks::SessionLockRegistry;

/// Error type for optimizer operations.
#[derive(Debug, thiserror::Error)]
pub enum OptimizerError {
    /// A store read or write failed; fatal to the current pass.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Optimizer configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The audit record was appended but the session mutation failed.
    /// Resolutions already committed stand; the caller can retry this one
    /// conflict.
    #[error("Resolution recorded but session {session_id} update failed: {source}")]
    PartialResolution {
        session_id: SessionId,
        source: RepositoryError,
    },
}

/// Result type for optimizer operations
pub type OptimizerResult<T> = Result<T, OptimizerError>;

fn target_session_id(session: &Session) -> OptimizerResult<SessionId> {
    session.id.ok_or_else(|| {
        OptimizerError::Repository(RepositoryError::validation(
            "Conflicting session has no store id",
        ))
    })
}

/// Resolve a batch of conflicts, one outcome per conflict.
///
/// Conflicts are processed sequentially and independently; a store failure
/// aborts the pass (already-committed resolutions stand).
pub async fn resolve_conflicts<R: FullRepository + ?Sized>(
    repo: &R,
    locks: &SessionLockRegistry,
    config: &OptimizerConfig,
    conflicts: &[Conflict],
) -> OptimizerResult<Vec<ResolutionOutcome>> {
    let mut outcomes = Vec::with_capacity(conflicts.len());
    for conflict in conflicts {
        let outcome = match conflict.kind {
            ConflictKind::HallDoubleBooking => {
                resolve_hall_clash(repo, locks, config, conflict).await?
            }
            ConflictKind::TeacherClash => resolve_teacher_clash(repo, locks, conflict).await?,
        };
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

/// Repair a hall double booking by moving the displaced session to a free
/// hall from the pool.
///
/// The pool is searched in order, skipping the session's current hall; the
/// first hall with no occupant at the exact slot key wins. No further
/// fallback (e.g. rescheduling the time) is attempted.
pub async fn resolve_hall_clash<R: FullRepository + ?Sized>(
    repo: &R,
    locks: &SessionLockRegistry,
    config: &OptimizerConfig,
    conflict: &Conflict,
) -> OptimizerResult<ResolutionOutcome> {
    let target = &conflict.existing;
    let target_id = target_session_id(target)?;

    let lock = locks.lock_for(target_id);
    let _guard = lock.lock().await;

    let available = find_available_hall(repo, config, &target.slot, &target.hall).await?;

    match available {
        Some(new_hall) => {
            let mut resolved = target.clone();
            resolved.hall = new_hall.clone();

            let record = Resolution {
                id: None,
                conflict_kind: ConflictKind::HallDoubleBooking,
                original_session: target.clone(),
                resolved_session: Some(resolved),
                description: format!("Reassigned class from {} to {}", target.hall, new_hall),
                timestamp: Utc::now(),
                status: ResolutionStatus::Success,
            };
            repo.append_resolution(&record).await?;

            repo.update_session_hall(target_id, &new_hall)
                .await
                .map_err(|source| OptimizerError::PartialResolution {
                    session_id: target_id,
                    source,
                })?;

            Ok(ResolutionOutcome {
                success: true,
                action: ResolutionAction::HallReassignment,
                detail: json!({
                    "session_id": target_id,
                    "new_hall": new_hall,
                }),
            })
        }
        None => {
            let record = Resolution {
                id: None,
                conflict_kind: ConflictKind::HallDoubleBooking,
                original_session: target.clone(),
                resolved_session: None,
                description: format!(
                    "No alternative hall available for {} at {}",
                    target.class_name, target.slot
                ),
                timestamp: Utc::now(),
                status: ResolutionStatus::FailedNoAlternative,
            };
            repo.append_resolution(&record).await?;

            Ok(ResolutionOutcome {
                success: false,
                action: ResolutionAction::FailedResolution,
                detail: json!({ "conflict": conflict.description }),
            })
        }
    }
}

/// Repair a teacher clash by assigning a qualified substitute who is free
/// at the slot.
///
/// Candidates are tried in store order. The displaced session itself books
/// its current teacher at the slot, so the clashing teacher is never
/// selected as their own substitute.
pub async fn resolve_teacher_clash<R: FullRepository + ?Sized>(
    repo: &R,
    locks: &SessionLockRegistry,
    conflict: &Conflict,
) -> OptimizerResult<ResolutionOutcome> {
    let target = &conflict.existing;
    let target_id = target_session_id(target)?;

    let lock = locks.lock_for(target_id);
    let _guard = lock.lock().await;

    let substitute = find_substitute_teacher(repo, &target.subject, &target.slot).await?;

    match substitute {
        Some(substitute) => {
            let mut resolved = target.clone();
            resolved.teacher = substitute.clone();

            let record = Resolution {
                id: None,
                conflict_kind: ConflictKind::TeacherClash,
                original_session: target.clone(),
                resolved_session: Some(resolved),
                description: format!("Assigned substitute teacher {}", substitute.name),
                timestamp: Utc::now(),
                status: ResolutionStatus::Success,
            };
            repo.append_resolution(&record).await?;

            repo.update_session_teacher(target_id, &substitute)
                .await
                .map_err(|source| OptimizerError::PartialResolution {
                    session_id: target_id,
                    source,
                })?;

            Ok(ResolutionOutcome {
                success: true,
                action: ResolutionAction::TeacherReassignment,
                detail: json!({
                    "session_id": target_id,
                    "new_teacher": substitute.id,
                    "teacher_name": substitute.name,
                }),
            })
        }
        None => {
            let record = Resolution {
                id: None,
                conflict_kind: ConflictKind::TeacherClash,
                original_session: target.clone(),
                resolved_session: None,
                description: format!(
                    "No substitute teacher available for {} at {}",
                    target.subject, target.slot
                ),
                timestamp: Utc::now(),
                status: ResolutionStatus::PendingManualReview,
            };
            repo.append_resolution(&record).await?;

            Ok(ResolutionOutcome {
                success: false,
                action: ResolutionAction::PendingManualReview,
                detail: json!({ "conflict": conflict.description }),
            })
        }
    }
}

/// First hall from the pool with no occupant at the slot, excluding
/// `exclude_hall`. Order-sensitive: the pool defines preference.
async fn find_available_hall<R: FullRepository + ?Sized>(
    repo: &R,
    config: &OptimizerConfig,
    slot: &TimeSlot,
    exclude_hall: &str,
) -> OptimizerResult<Option<String>> {
    for hall in &config.available_halls {
        if hall == exclude_hall {
            continue;
        }
        if repo.find_session_by_hall(hall, slot).await?.is_none() {
            return Ok(Some(hall.clone()));
        }
    }
    Ok(None)
}

/// First teacher qualified for `subject` with no session at the slot.
async fn find_substitute_teacher<R: FullRepository + ?Sized>(
    repo: &R,
    subject: &str,
    slot: &TimeSlot,
) -> OptimizerResult<Option<TeacherRef>> {
    let teachers = repo.list_teachers_by_subject(subject).await?;
    for teacher in teachers {
        let Some(id) = teacher.id else {
            continue;
        };
        if repo.find_session_by_teacher(id, slot).await?.is_none() {
            return Ok(Some(TeacherRef {
                id,
                name: teacher.name,
            }));
        }
    }
    Ok(None)
}
