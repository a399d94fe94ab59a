//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Query, State},
    Json,
};

use super::dto::{
    HealthResponse, ImportTimetableRequest, ImportTimetableResponse, ResolutionLogQuery,
    SessionListResponse, TeacherListQuery, TeacherListResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{OptimizationReport, Resolution, ResolutionQuery, Session, Teacher};
use crate::db::services as db_services;
use crate::models::timetable::parse_timetable_json_str;
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Sessions
// =============================================================================

/// GET /v1/sessions
///
/// List every scheduled session, in store order.
pub async fn list_sessions(State(state): State<AppState>) -> HandlerResult<SessionListResponse> {
    let sessions = db_services::list_sessions(state.repository.as_ref()).await?;
    let total = sessions.len();

    Ok(Json(SessionListResponse { sessions, total }))
}

/// POST /v1/sessions
///
/// Create a single scheduled session.
pub async fn create_session(
    State(state): State<AppState>,
    Json(session): Json<Session>,
) -> Result<(axum::http::StatusCode, Json<Session>), AppError> {
    let stored = db_services::store_session(state.repository.as_ref(), &session).await?;
    Ok((axum::http::StatusCode::CREATED, Json(stored)))
}

// =============================================================================
// Teachers
// =============================================================================

/// GET /v1/teachers
///
/// List teachers, optionally restricted to those qualified for a subject.
pub async fn list_teachers(
    State(state): State<AppState>,
    Query(query): Query<TeacherListQuery>,
) -> HandlerResult<TeacherListResponse> {
    let teachers = match query.subject {
        Some(subject) => {
            db_services::list_teachers_by_subject(state.repository.as_ref(), &subject).await?
        }
        None => db_services::list_teachers(state.repository.as_ref()).await?,
    };
    let total = teachers.len();

    Ok(Json(TeacherListResponse { teachers, total }))
}

/// POST /v1/teachers
///
/// Create a teacher record.
pub async fn create_teacher(
    State(state): State<AppState>,
    Json(teacher): Json<Teacher>,
) -> Result<(axum::http::StatusCode, Json<Teacher>), AppError> {
    let stored = db_services::store_teacher(state.repository.as_ref(), &teacher).await?;
    Ok((axum::http::StatusCode::CREATED, Json(stored)))
}

// =============================================================================
// Timetable Import & Optimization
// =============================================================================

/// POST /v1/timetable/import
///
/// Parse and store a bulk timetable document (teachers + sessions).
pub async fn import_timetable(
    State(state): State<AppState>,
    Json(request): Json<ImportTimetableRequest>,
) -> Result<(axum::http::StatusCode, Json<ImportTimetableResponse>), AppError> {
    let timetable_json = serde_json::to_string(&request.timetable_json)
        .map_err(|e| AppError::BadRequest(format!("Invalid timetable JSON: {}", e)))?;

    let document = parse_timetable_json_str(&timetable_json)
        .map_err(|e| AppError::BadRequest(format!("{:#}", e)))?;

    let (teachers_stored, sessions_stored) =
        db_services::import_timetable(state.repository.as_ref(), &document).await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(ImportTimetableResponse {
            teachers_stored,
            sessions_stored,
            message: "Timetable imported".to_string(),
        }),
    ))
}

/// POST /v1/timetable/optimize
///
/// Run one detect-then-resolve pass over the full timetable and return the
/// aggregate report.
pub async fn optimize_timetable(
    State(state): State<AppState>,
) -> HandlerResult<OptimizationReport> {
    let report = services::run_optimization_pass(
        state.repository.as_ref(),
        &state.session_locks,
        &state.optimizer_config,
    )
    .await?;

    Ok(Json(report))
}

// =============================================================================
// Resolution Audit Log
// =============================================================================

/// GET /v1/optimization/logs
///
/// List resolution audit records, newest first, optionally filtered by
/// conflict kind and status.
pub async fn list_resolution_logs(
    State(state): State<AppState>,
    Query(query): Query<ResolutionLogQuery>,
) -> HandlerResult<Vec<Resolution>> {
    let filter = ResolutionQuery {
        conflict_kind: query.conflict_type,
        status: query.status,
    };
    let logs = db_services::list_resolutions(state.repository.as_ref(), &filter).await?;

    Ok(Json(logs))
}
