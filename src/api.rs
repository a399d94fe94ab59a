//! Public API surface for the Rust backend.
//!
//! This file consolidates the identifier newtypes and the DTO types for the
//! HTTP API. All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::conflicts::Conflict;
pub use crate::routes::conflicts::ConflictKind;
pub use crate::routes::optimization::OptimizationReport;
pub use crate::routes::optimization::OptimizationSummary;
pub use crate::routes::resolutions::Resolution;
pub use crate::routes::resolutions::ResolutionAction;
pub use crate::routes::resolutions::ResolutionOutcome;
pub use crate::routes::resolutions::ResolutionQuery;
pub use crate::routes::resolutions::ResolutionStatus;

pub use crate::models::timetable::Session;
pub use crate::models::timetable::Teacher;
pub use crate::models::timetable::TeacherRef;
pub use crate::models::timetable::TimetableDocument;
pub use crate::models::{DayOfWeek, TimeOfDay, TimeSlot};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session identifier (store primary key for one scheduled class occurrence).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

/// Teacher identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeacherId(pub Uuid);

/// Resolution audit record identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResolutionId(pub Uuid);

impl SessionId {
    pub fn new(value: Uuid) -> Self {
        SessionId(value)
    }

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        SessionId(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl TeacherId {
    pub fn new(value: Uuid) -> Self {
        TeacherId(value)
    }

    pub fn generate() -> Self {
        TeacherId(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl ResolutionId {
    pub fn new(value: Uuid) -> Self {
        ResolutionId(value)
    }

    pub fn generate() -> Self {
        ResolutionId(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for TeacherId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for ResolutionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SessionId> for Uuid {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_roundtrip() {
        let id = SessionId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let back: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        assert_ne!(TeacherId::generate(), TeacherId::generate());
        assert_ne!(ResolutionId::generate(), ResolutionId::generate());
    }

    #[test]
    fn test_display_matches_inner_uuid() {
        let raw = Uuid::new_v4();
        let id = SessionId::new(raw);
        assert_eq!(id.to_string(), raw.to_string());
        assert_eq!(id.value(), raw);
    }
}
