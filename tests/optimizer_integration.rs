use async_trait::async_trait;

use sto_rust::api::{
    Conflict, ConflictKind, DayOfWeek, Resolution, ResolutionAction, ResolutionQuery,
    ResolutionStatus, Session, SessionId, Teacher, TeacherId, TeacherRef, TimeOfDay, TimeSlot,
};
use sto_rust::db::repositories::LocalRepository;
use sto_rust::db::repository::{
    RepositoryError, RepositoryResult, ResolutionRepository, TeacherRepository,
    TimetableRepository,
};
use sto_rust::services::{
    detect_conflicts, resolve_conflicts, run_optimization_pass, OptimizerConfig, OptimizerError,
    SessionLockRegistry,
};

fn slot(day: DayOfWeek, start: (u32, u32), end: (u32, u32)) -> TimeSlot {
    TimeSlot::new(
        day,
        TimeOfDay::new(start.0, start.1).unwrap(),
        TimeOfDay::new(end.0, end.1).unwrap(),
    )
    .unwrap()
}

fn monday_morning() -> TimeSlot {
    slot(DayOfWeek::Monday, (9, 0), (10, 30))
}

fn teacher_ref(name: &str) -> TeacherRef {
    TeacherRef {
        id: TeacherId::generate(),
        name: name.to_string(),
    }
}

fn session(subject: &str, teacher: &TeacherRef, hall: &str, at: TimeSlot) -> Session {
    Session {
        id: None,
        class_name: format!("{} class", subject),
        section: "A".to_string(),
        subject: subject.to_string(),
        teacher: teacher.clone(),
        hall: hall.to_string(),
        slot: at,
        semester: "1".to_string(),
        academic_year: "2024".to_string(),
    }
}

fn qualified_teacher(name: &str, id: TeacherId, subjects: &[&str]) -> Teacher {
    Teacher {
        id: Some(id),
        name: name.to_string(),
        employee_id: format!("T-{}", name),
        department: "Science".to_string(),
        subjects: subjects.iter().map(|s| s.to_string()).collect(),
    }
}

fn halls(pool: &[&str]) -> OptimizerConfig {
    OptimizerConfig {
        available_halls: pool.iter().map(|h| h.to_string()).collect(),
    }
}

// =============================================================================
// Detection
// =============================================================================

#[tokio::test]
async fn test_collision_free_timetable_detects_nothing() {
    let repo = LocalRepository::new();
    let asha = teacher_ref("Asha");
    let ruwan = teacher_ref("Ruwan");

    repo.store_session(&session("Data Structures", &asha, "A101", monday_morning()))
        .await
        .unwrap();
    repo.store_session(&session(
        "Algorithms",
        &asha,
        "A101",
        slot(DayOfWeek::Tuesday, (9, 0), (10, 30)),
    ))
    .await
    .unwrap();
    repo.store_session(&session("Chemistry", &ruwan, "A102", monday_morning()))
        .await
        .unwrap();

    let conflicts = detect_conflicts(&repo).await.unwrap();
    assert!(conflicts.is_empty());
}

#[tokio::test]
async fn test_detection_is_idempotent_without_writes() {
    let repo = LocalRepository::new();
    let asha = teacher_ref("Asha");
    repo.store_session(&session("Data Structures", &asha, "A101", monday_morning()))
        .await
        .unwrap();
    repo.store_session(&session("Algorithms", &asha, "A102", monday_morning()))
        .await
        .unwrap();

    let first = detect_conflicts(&repo).await.unwrap();
    let second = detect_conflicts(&repo).await.unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.session.id, b.session.id);
        assert_eq!(a.existing.id, b.existing.id);
        assert_eq!(a.description, b.description);
    }
}

#[tokio::test]
async fn test_detection_propagates_store_read_failure() {
    let repo = LocalRepository::new();
    repo.set_healthy(false);

    let err = detect_conflicts(&repo).await.unwrap_err();
    assert!(matches!(err, OptimizerError::Repository(_)));
}

// =============================================================================
// Hall clash resolution
// =============================================================================

#[tokio::test]
async fn test_hall_clash_reassigns_to_first_free_hall() {
    let repo = LocalRepository::new();
    let asha = teacher_ref("Asha");
    let ruwan = teacher_ref("Ruwan");

    // Both classes in A101 at the same slot; A102 is free.
    let moved = repo
        .store_session(&session("Data Structures", &asha, "A101", monday_morning()))
        .await
        .unwrap();
    repo.store_session(&session("Chemistry", &ruwan, "A101", monday_morning()))
        .await
        .unwrap();

    let locks = SessionLockRegistry::new();
    let config = halls(&["A101", "A102"]);

    let conflicts = detect_conflicts(&repo).await.unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].kind, ConflictKind::HallDoubleBooking);

    let outcomes = resolve_conflicts(&repo, &locks, &config, &conflicts)
        .await
        .unwrap();
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].success);
    assert_eq!(outcomes[0].action, ResolutionAction::HallReassignment);
    assert_eq!(outcomes[0].detail["new_hall"], "A102");

    // The displaced session was rewritten in the store.
    let updated = repo.get_session(moved.id.unwrap()).await.unwrap();
    assert_eq!(updated.hall, "A102");

    // Exactly one success audit record, with before/after snapshots.
    let records = repo
        .list_resolutions(&ResolutionQuery::default())
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, ResolutionStatus::Success);
    assert_eq!(records[0].original_session.hall, "A101");
    assert_eq!(
        records[0].resolved_session.as_ref().unwrap().hall,
        "A102"
    );
    assert!(records[0].description.contains("A101"));
    assert!(records[0].description.contains("A102"));

    // The conflict is gone on the next pass.
    assert!(detect_conflicts(&repo).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_hall_clash_with_full_pool_is_terminal_failure() {
    let repo = LocalRepository::new();
    let asha = teacher_ref("Asha");
    let ruwan = teacher_ref("Ruwan");
    let nimal = teacher_ref("Nimal");

    repo.store_session(&session("Data Structures", &asha, "A101", monday_morning()))
        .await
        .unwrap();
    repo.store_session(&session("Chemistry", &ruwan, "A101", monday_morning()))
        .await
        .unwrap();
    // The only other pool hall is occupied at the slot.
    repo.store_session(&session("Physics", &nimal, "A102", monday_morning()))
        .await
        .unwrap();

    let locks = SessionLockRegistry::new();
    let config = halls(&["A101", "A102"]);

    let conflicts = detect_conflicts(&repo).await.unwrap();
    assert_eq!(conflicts.len(), 1);

    let outcomes = resolve_conflicts(&repo, &locks, &config, &conflicts)
        .await
        .unwrap();
    assert!(!outcomes[0].success);
    assert_eq!(outcomes[0].action, ResolutionAction::FailedResolution);
    assert_eq!(outcomes[0].detail["conflict"], conflicts[0].description);

    let records = repo
        .list_resolutions(&ResolutionQuery::default())
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, ResolutionStatus::FailedNoAlternative);
    assert!(records[0].resolved_session.is_none());

    // Nothing moved; the conflict persists for the next pass.
    let again = detect_conflicts(&repo).await.unwrap();
    assert_eq!(again.len(), 1);
}

// =============================================================================
// Teacher clash resolution
// =============================================================================

#[tokio::test]
async fn test_teacher_clash_assigns_free_substitute() {
    let repo = LocalRepository::new();

    let asha_id = TeacherId::generate();
    let nimal_id = TeacherId::generate();
    let asha = TeacherRef {
        id: asha_id,
        name: "Asha".to_string(),
    };

    repo.store_teacher(&qualified_teacher("Asha", asha_id, &["Data Structures"]))
        .await
        .unwrap();
    repo.store_teacher(&qualified_teacher("Nimal", nimal_id, &["Data Structures"]))
        .await
        .unwrap();

    // Asha is double-booked across two halls.
    let moved = repo
        .store_session(&session("Data Structures", &asha, "A101", monday_morning()))
        .await
        .unwrap();
    repo.store_session(&session("Data Structures", &asha, "A102", monday_morning()))
        .await
        .unwrap();

    let locks = SessionLockRegistry::new();
    let config = OptimizerConfig::default();

    let conflicts = detect_conflicts(&repo).await.unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].kind, ConflictKind::TeacherClash);

    let outcomes = resolve_conflicts(&repo, &locks, &config, &conflicts)
        .await
        .unwrap();
    assert!(outcomes[0].success);
    assert_eq!(outcomes[0].action, ResolutionAction::TeacherReassignment);
    assert_eq!(outcomes[0].detail["teacher_name"], "Nimal");

    let updated = repo.get_session(moved.id.unwrap()).await.unwrap();
    assert_eq!(updated.teacher.id, nimal_id);

    let records = repo
        .list_resolutions(&ResolutionQuery::default())
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, ResolutionStatus::Success);
    assert!(records[0].description.contains("Nimal"));

    assert!(detect_conflicts(&repo).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_teacher_clash_without_substitute_is_pending() {
    let repo = LocalRepository::new();

    let asha_id = TeacherId::generate();
    let asha = TeacherRef {
        id: asha_id,
        name: "Asha".to_string(),
    };
    // The only teacher qualified for the subject is the clashing one.
    repo.store_teacher(&qualified_teacher("Asha", asha_id, &["Data Structures"]))
        .await
        .unwrap();

    repo.store_session(&session("Data Structures", &asha, "A101", monday_morning()))
        .await
        .unwrap();
    repo.store_session(&session("Data Structures", &asha, "A102", monday_morning()))
        .await
        .unwrap();

    let locks = SessionLockRegistry::new();
    let config = OptimizerConfig::default();

    let conflicts = detect_conflicts(&repo).await.unwrap();
    let outcomes = resolve_conflicts(&repo, &locks, &config, &conflicts)
        .await
        .unwrap();

    assert!(!outcomes[0].success);
    assert_eq!(outcomes[0].action, ResolutionAction::PendingManualReview);

    let records = repo
        .list_resolutions(&ResolutionQuery::default())
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, ResolutionStatus::PendingManualReview);
    assert!(records[0].resolved_session.is_none());
}

// =============================================================================
// Full pass
// =============================================================================

#[tokio::test]
async fn test_pass_over_clean_timetable_reports_no_conflicts() {
    let repo = LocalRepository::new();
    let locks = SessionLockRegistry::new();

    let report = run_optimization_pass(&repo, &locks, &OptimizerConfig::default())
        .await
        .unwrap();
    assert_eq!(report.message, "No conflicts detected");
    assert_eq!(report.conflicts_detected, 0);
    assert_eq!(report.summary.total_conflicts, 0);
}

#[tokio::test]
async fn test_full_pass_tallies_outcomes() {
    let repo = LocalRepository::new();

    let asha_id = TeacherId::generate();
    let nimal_id = TeacherId::generate();
    let asha = TeacherRef {
        id: asha_id,
        name: "Asha".to_string(),
    };
    let ruwan = teacher_ref("Ruwan");

    repo.store_teacher(&qualified_teacher("Asha", asha_id, &["Data Structures"]))
        .await
        .unwrap();
    repo.store_teacher(&qualified_teacher("Nimal", nimal_id, &["Data Structures"]))
        .await
        .unwrap();

    // Teacher clash (resolvable: Nimal is free) in halls A101/A102, plus an
    // independent hall clash in B101 with no free hall in the pool.
    repo.store_session(&session("Data Structures", &asha, "A101", monday_morning()))
        .await
        .unwrap();
    repo.store_session(&session("Data Structures", &asha, "A102", monday_morning()))
        .await
        .unwrap();
    let friday = slot(DayOfWeek::Friday, (13, 0), (14, 30));
    repo.store_session(&session("Chemistry", &ruwan, "B101", friday))
        .await
        .unwrap();
    repo.store_session(&session("Physics", &teacher_ref("Nimal"), "B101", friday))
        .await
        .unwrap();

    let locks = SessionLockRegistry::new();
    // Pool contains only the clashing hall, so the hall clash cannot move.
    let config = halls(&["B101"]);

    let report = run_optimization_pass(&repo, &locks, &config).await.unwrap();

    assert_eq!(report.message, "Timetable optimization completed");
    assert_eq!(report.conflicts_detected, 2);
    assert_eq!(report.summary.total_conflicts, 2);
    assert_eq!(report.summary.resolved, 1);
    assert_eq!(report.summary.pending, 1);
    assert_eq!(report.conflicts.len(), 2);
    assert_eq!(report.resolutions.len(), 2);

    // One audit record per attempt.
    assert_eq!(repo.resolution_count(), 2);
}

#[tokio::test]
async fn test_end_to_end_teacher_clash_scenario() {
    // Sessions [{T1, Mon 9:00-10:30, A101}, {T1, Mon 9:00-10:30, A102}]
    // yield one teacher clash; the outcome depends on the teacher pool.
    let repo = LocalRepository::new();
    let t1_id = TeacherId::generate();
    let t1 = TeacherRef {
        id: t1_id,
        name: "T1".to_string(),
    };
    repo.store_teacher(&qualified_teacher("T1", t1_id, &["Data Structures"]))
        .await
        .unwrap();
    repo.store_session(&session("Data Structures", &t1, "A101", monday_morning()))
        .await
        .unwrap();
    repo.store_session(&session("Data Structures", &t1, "A102", monday_morning()))
        .await
        .unwrap();

    let locks = SessionLockRegistry::new();
    let report = run_optimization_pass(&repo, &locks, &OptimizerConfig::default())
        .await
        .unwrap();

    assert_eq!(report.conflicts_detected, 1);
    assert_eq!(report.conflicts[0].kind, ConflictKind::TeacherClash);
    // No free substitute exists, so the pass leaves it for manual review.
    assert_eq!(
        report.resolutions[0].action,
        ResolutionAction::PendingManualReview
    );
    assert_eq!(report.summary.pending, 1);
}

// =============================================================================
// Partial resolution (audit appended, mutation failed)
// =============================================================================

/// Wrapper repository whose session mutations always fail, for exercising
/// the audit-before-mutate ordering.
struct BrokenUpdateRepository {
    inner: LocalRepository,
}

#[async_trait]
impl TimetableRepository for BrokenUpdateRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.inner.health_check().await
    }

    async fn store_session(&self, session: &Session) -> RepositoryResult<Session> {
        self.inner.store_session(session).await
    }

    async fn get_session(&self, session_id: SessionId) -> RepositoryResult<Session> {
        self.inner.get_session(session_id).await
    }

    async fn list_sessions(&self) -> RepositoryResult<Vec<Session>> {
        self.inner.list_sessions().await
    }

    async fn find_session_by_hall(
        &self,
        hall: &str,
        slot: &TimeSlot,
    ) -> RepositoryResult<Option<Session>> {
        self.inner.find_session_by_hall(hall, slot).await
    }

    async fn find_session_by_teacher(
        &self,
        teacher_id: TeacherId,
        slot: &TimeSlot,
    ) -> RepositoryResult<Option<Session>> {
        self.inner.find_session_by_teacher(teacher_id, slot).await
    }

    async fn update_session_hall(
        &self,
        _session_id: SessionId,
        _hall: &str,
    ) -> RepositoryResult<Session> {
        Err(RepositoryError::query("simulated write failure"))
    }

    async fn update_session_teacher(
        &self,
        _session_id: SessionId,
        _teacher: &TeacherRef,
    ) -> RepositoryResult<Session> {
        Err(RepositoryError::query("simulated write failure"))
    }
}

#[async_trait]
impl TeacherRepository for BrokenUpdateRepository {
    async fn store_teacher(&self, teacher: &Teacher) -> RepositoryResult<Teacher> {
        self.inner.store_teacher(teacher).await
    }

    async fn list_teachers(&self) -> RepositoryResult<Vec<Teacher>> {
        self.inner.list_teachers().await
    }

    async fn list_teachers_by_subject(&self, subject: &str) -> RepositoryResult<Vec<Teacher>> {
        self.inner.list_teachers_by_subject(subject).await
    }
}

#[async_trait]
impl ResolutionRepository for BrokenUpdateRepository {
    async fn append_resolution(&self, resolution: &Resolution) -> RepositoryResult<Resolution> {
        self.inner.append_resolution(resolution).await
    }

    async fn list_resolutions(
        &self,
        query: &ResolutionQuery,
    ) -> RepositoryResult<Vec<Resolution>> {
        self.inner.list_resolutions(query).await
    }
}

#[tokio::test]
async fn test_failed_mutation_after_audit_surfaces_partial_resolution() {
    let repo = BrokenUpdateRepository {
        inner: LocalRepository::new(),
    };
    let asha = teacher_ref("Asha");
    let ruwan = teacher_ref("Ruwan");

    let moved = repo
        .store_session(&session("Data Structures", &asha, "A101", monday_morning()))
        .await
        .unwrap();
    repo.store_session(&session("Chemistry", &ruwan, "A101", monday_morning()))
        .await
        .unwrap();

    let locks = SessionLockRegistry::new();
    let config = halls(&["A101", "A102"]);

    let conflicts: Vec<Conflict> = detect_conflicts(&repo).await.unwrap();
    let err = resolve_conflicts(&repo, &locks, &config, &conflicts)
        .await
        .unwrap_err();

    match err {
        OptimizerError::PartialResolution { session_id, .. } => {
            assert_eq!(Some(session_id), moved.id);
        }
        other => panic!("expected PartialResolution, got {:?}", other),
    }

    // The audit record describing the attempt was still written.
    assert_eq!(repo.inner.resolution_count(), 1);
    let records = repo
        .inner
        .list_resolutions(&ResolutionQuery::default())
        .await
        .unwrap();
    assert_eq!(records[0].status, ResolutionStatus::Success);
}
