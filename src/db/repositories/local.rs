//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. Sessions and teachers
//! are held in insertion order, which is the store order the detector's
//! chaining policy and the substitute search depend on.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::api::{
    Resolution, ResolutionId, ResolutionQuery, Session, SessionId, Teacher, TeacherId,
    TeacherRef, TimeSlot,
};
use crate::db::repository::{
    ErrorContext, RepositoryError, RepositoryResult, ResolutionRepository, TeacherRepository,
    TimetableRepository,
};

/// In-memory local repository.
///
/// All data lives in process memory, making this implementation ideal for
/// unit tests and local development that need isolation and speed.
///
/// # Example
/// ```ignore
/// let repo = LocalRepository::new();
/// let stored = repo.store_session(&session).await?;
/// assert!(stored.id.is_some());
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Default)]
struct LocalData {
    sessions: Vec<Session>,
    teachers: Vec<Teacher>,
    resolutions: Vec<Resolution>,
    is_healthy: bool,
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData {
                is_healthy: true,
                ..Default::default()
            })),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        let mut data = self.data.write().unwrap();
        data.is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        let healthy = data.is_healthy;
        *data = LocalData {
            is_healthy: healthy,
            ..Default::default()
        };
    }

    /// Number of sessions stored.
    pub fn session_count(&self) -> usize {
        self.data.read().unwrap().sessions.len()
    }

    /// Number of resolution records stored.
    pub fn resolution_count(&self) -> usize {
        self.data.read().unwrap().resolutions.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        let data = self.data.read().unwrap();
        if !data.is_healthy {
            return Err(RepositoryError::connection("Store is not healthy"));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TimetableRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let data = self.data.read().unwrap();
        Ok(data.is_healthy)
    }

    async fn store_session(&self, session: &Session) -> RepositoryResult<Session> {
        self.check_health()?;

        let mut stored = session.clone();
        stored.id = Some(stored.id.unwrap_or_else(SessionId::generate));

        let mut data = self.data.write().unwrap();
        data.sessions.push(stored.clone());
        Ok(stored)
    }

    async fn get_session(&self, session_id: SessionId) -> RepositoryResult<Session> {
        self.check_health()?;

        let data = self.data.read().unwrap();
        data.sessions
            .iter()
            .find(|s| s.id == Some(session_id))
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Session {} not found", session_id),
                    ErrorContext::new("get_session")
                        .with_entity("session")
                        .with_entity_id(session_id),
                )
            })
    }

    async fn list_sessions(&self) -> RepositoryResult<Vec<Session>> {
        self.check_health()?;

        let data = self.data.read().unwrap();
        Ok(data.sessions.clone())
    }

    async fn find_session_by_hall(
        &self,
        hall: &str,
        slot: &TimeSlot,
    ) -> RepositoryResult<Option<Session>> {
        self.check_health()?;

        let data = self.data.read().unwrap();
        Ok(data
            .sessions
            .iter()
            .find(|s| s.hall == hall && s.slot == *slot)
            .cloned())
    }

    async fn find_session_by_teacher(
        &self,
        teacher_id: TeacherId,
        slot: &TimeSlot,
    ) -> RepositoryResult<Option<Session>> {
        self.check_health()?;

        let data = self.data.read().unwrap();
        Ok(data
            .sessions
            .iter()
            .find(|s| s.teacher.id == teacher_id && s.slot == *slot)
            .cloned())
    }

    async fn update_session_hall(
        &self,
        session_id: SessionId,
        hall: &str,
    ) -> RepositoryResult<Session> {
        self.check_health()?;

        let mut data = self.data.write().unwrap();
        let session = data
            .sessions
            .iter_mut()
            .find(|s| s.id == Some(session_id))
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Session {} not found", session_id),
                    ErrorContext::new("update_session_hall")
                        .with_entity("session")
                        .with_entity_id(session_id),
                )
            })?;
        session.hall = hall.to_string();
        Ok(session.clone())
    }

    async fn update_session_teacher(
        &self,
        session_id: SessionId,
        teacher: &TeacherRef,
    ) -> RepositoryResult<Session> {
        self.check_health()?;

        let mut data = self.data.write().unwrap();
        let session = data
            .sessions
            .iter_mut()
            .find(|s| s.id == Some(session_id))
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Session {} not found", session_id),
                    ErrorContext::new("update_session_teacher")
                        .with_entity("session")
                        .with_entity_id(session_id),
                )
            })?;
        session.teacher = teacher.clone();
        Ok(session.clone())
    }
}

#[async_trait]
impl TeacherRepository for LocalRepository {
    async fn store_teacher(&self, teacher: &Teacher) -> RepositoryResult<Teacher> {
        self.check_health()?;

        let mut stored = teacher.clone();
        stored.id = Some(stored.id.unwrap_or_else(TeacherId::generate));

        let mut data = self.data.write().unwrap();
        data.teachers.push(stored.clone());
        Ok(stored)
    }

    async fn list_teachers(&self) -> RepositoryResult<Vec<Teacher>> {
        self.check_health()?;

        let data = self.data.read().unwrap();
        Ok(data.teachers.clone())
    }

    async fn list_teachers_by_subject(&self, subject: &str) -> RepositoryResult<Vec<Teacher>> {
        self.check_health()?;

        let data = self.data.read().unwrap();
        Ok(data
            .teachers
            .iter()
            .filter(|t| t.teaches(subject))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ResolutionRepository for LocalRepository {
    async fn append_resolution(&self, resolution: &Resolution) -> RepositoryResult<Resolution> {
        self.check_health()?;

        let mut stored = resolution.clone();
        stored.id = Some(stored.id.unwrap_or_else(ResolutionId::generate));

        let mut data = self.data.write().unwrap();
        data.resolutions.push(stored.clone());
        Ok(stored)
    }

    async fn list_resolutions(
        &self,
        query: &ResolutionQuery,
    ) -> RepositoryResult<Vec<Resolution>> {
        self.check_health()?;

        let data = self.data.read().unwrap();
        let mut matching: Vec<Resolution> = data
            .resolutions
            .iter()
            .filter(|r| {
                query
                    .conflict_kind
                    .map_or(true, |kind| r.conflict_kind == kind)
                    && query.status.map_or(true, |status| r.status == status)
            })
            .cloned()
            .collect();

        // Newest first; append order breaks timestamp ties.
        matching.reverse();
        matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(matching)
    }
}
