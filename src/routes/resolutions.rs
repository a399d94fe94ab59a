use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::ResolutionId;
use crate::models::timetable::Session;
use crate::routes::conflicts::ConflictKind;

/// Terminal status of one resolution attempt.
///
/// The hall path reports `failed_no_alternative` while the teacher path
/// reports `pending_manual_review`; both labels are kept as-is for
/// compatibility with existing audit-log consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    Success,
    FailedNoAlternative,
    PendingManualReview,
}

impl ResolutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionStatus::Success => "success",
            ResolutionStatus::FailedNoAlternative => "failed_no_alternative",
            ResolutionStatus::PendingManualReview => "pending_manual_review",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResolutionStatus::Success)
    }
}

impl std::fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResolutionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(ResolutionStatus::Success),
            "failed_no_alternative" => Ok(ResolutionStatus::FailedNoAlternative),
            "pending_manual_review" => Ok(ResolutionStatus::PendingManualReview),
            other => Err(format!("Unknown resolution status: {}", other)),
        }
    }
}

/// Append-only audit record of one attempted conflict repair.
///
/// Exactly one record is written per resolution attempt; records are never
/// mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    /// Store-assigned identifier; `None` before the append.
    pub id: Option<ResolutionId>,
    pub conflict_kind: ConflictKind,
    /// Snapshot of the colliding session before any mutation.
    pub original_session: Session,
    /// Snapshot after the mutation; absent when the attempt failed.
    pub resolved_session: Option<Session>,
    /// Free-text description of the action taken.
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub status: ResolutionStatus,
}

/// Action label of a caller-facing resolution outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionAction {
    HallReassignment,
    TeacherReassignment,
    FailedResolution,
    PendingManualReview,
}

/// Per-conflict result returned to the caller of a resolution pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionOutcome {
    pub success: bool,
    pub action: ResolutionAction,
    /// Action-specific payload: the reassigned session id plus the new hall
    /// or teacher on success, the conflict description otherwise.
    pub detail: serde_json::Value,
}

/// Filter for querying the resolution audit log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolutionQuery {
    #[serde(default)]
    pub conflict_kind: Option<ConflictKind>,
    #[serde(default)]
    pub status: Option<ResolutionStatus>,
}

/// Resolution route function name constants
pub const RESOLVE_CONFLICTS: &str = "resolve_conflicts";
pub const LIST_RESOLUTION_LOGS: &str = "list_resolution_logs";
