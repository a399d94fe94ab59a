use serde::{Deserialize, Serialize};

use crate::models::timetable::Session;

/// Kind of scheduling collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// The same teacher is booked in two places at one slot.
    TeacherClash,
    /// The same hall hosts two classes at one slot.
    HallDoubleBooking,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictKind::TeacherClash => "teacher_clash",
            ConflictKind::HallDoubleBooking => "hall_double_booking",
        }
    }
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected pairwise collision between two sessions.
///
/// Conflicts are transient: they are recomputed on every detection pass and
/// never persisted. Only resolution outcomes reach the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    /// The session under scan when the collision surfaced.
    pub session: Session,
    /// The session that already held the slot key. The resolver reassigns
    /// this one.
    pub existing: Session,
    pub description: String,
}

/// Conflict route function name constant
pub const DETECT_CONFLICTS: &str = "detect_conflicts";
