//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Domain DTOs are re-exported from the api module since they already
//! derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    // Conflicts
    Conflict, ConflictKind,
    // Optimization
    OptimizationReport, OptimizationSummary,
    // Resolutions
    Resolution, ResolutionAction, ResolutionOutcome, ResolutionStatus,
    // Timetable
    Session, Teacher, TeacherRef,
};

/// Request body for importing a timetable document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportTimetableRequest {
    /// Timetable JSON data (`teachers` and `sessions` arrays)
    pub timetable_json: serde_json::Value,
}

/// Response for a timetable import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportTimetableResponse {
    pub teachers_stored: usize,
    pub sessions_stored: usize,
    /// Message about the operation
    pub message: String,
}

/// Query parameters for the teacher list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TeacherListQuery {
    /// Restrict to teachers qualified for this subject (optional)
    #[serde(default)]
    pub subject: Option<String>,
}

/// Query parameters for the resolution log endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResolutionLogQuery {
    /// Filter by conflict kind (optional)
    #[serde(default)]
    pub conflict_type: Option<ConflictKind>,
    /// Filter by resolution status (optional)
    #[serde(default)]
    pub status: Option<ResolutionStatus>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Store connection status
    pub database: String,
}

/// Session list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionListResponse {
    /// List of sessions in store order
    pub sessions: Vec<Session>,
    /// Total count
    pub total: usize,
}

/// Teacher list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherListResponse {
    /// List of teachers in store order
    pub teachers: Vec<Teacher>,
    /// Total count
    pub total: usize,
}
