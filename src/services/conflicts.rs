//! Conflict detection over the scheduled session set.
//!
//! One pass over the sessions finds every pairwise collision on
//! (teacher, slot) and, independently, on (hall, slot). Slot comparison is
//! exact `(day, start, end)` equality; partially overlapping ranges do not
//! collide under this policy (see `TimeSlot::overlaps` for the stricter
//! test).

use std::collections::HashMap;

use crate::api::{Conflict, ConflictKind, Session, TeacherId, TimeSlot};
use crate::db::repository::FullRepository;
use crate::services::resolver::OptimizerResult;

/// Scan sessions in order and report every slot-key collision.
///
/// The working maps hold the most-recently-seen session per key: when a key
/// repeats, the new session is paired with the stored one and then replaces
/// it, so a third colliding session clashes against the second, not the
/// first. Teacher clashes are reported before hall clashes, and one session
/// may appear in both kinds.
pub fn detect_conflicts_in(sessions: &[Session]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    // Teacher clashes: the same teacher booked in two places at one slot.
    let mut teacher_schedule: HashMap<(TeacherId, TimeSlot), Session> = HashMap::new();
    for session in sessions {
        let key = (session.teacher.id, session.slot);
        if let Some(existing) = teacher_schedule.get(&key) {
            conflicts.push(Conflict {
                kind: ConflictKind::TeacherClash,
                description: format!(
                    "Teacher {} has clash: {} and {}",
                    session.teacher.name, session.subject, existing.subject
                ),
                session: session.clone(),
                existing: existing.clone(),
            });
        }
        teacher_schedule.insert(key, session.clone());
    }

    // Hall double bookings, scanned independently.
    let mut hall_schedule: HashMap<(String, TimeSlot), Session> = HashMap::new();
    for session in sessions {
        let key = (session.hall.clone(), session.slot);
        if let Some(existing) = hall_schedule.get(&key) {
            conflicts.push(Conflict {
                kind: ConflictKind::HallDoubleBooking,
                description: format!(
                    "Hall {} is double-booked at {}",
                    session.hall, session.slot.start
                ),
                session: session.clone(),
                existing: existing.clone(),
            });
        }
        hall_schedule.insert(key, session.clone());
    }

    conflicts
}

/// Read the full session set and detect conflicts.
///
/// An empty store yields an empty conflict list; a failed read propagates
/// unmodified.
pub async fn detect_conflicts<R: FullRepository + ?Sized>(
    repo: &R,
) -> OptimizerResult<Vec<Conflict>> {
    let sessions = repo.list_sessions().await?;
    Ok(detect_conflicts_in(&sessions))
}
