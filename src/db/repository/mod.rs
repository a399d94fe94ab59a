//! Repository trait definitions.
//!
//! Each concern gets its own trait; `FullRepository` is the supertrait that
//! concrete backends implement and the service layer consumes.

pub mod error;
pub mod resolutions;
pub mod teachers;
pub mod timetable;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use resolutions::ResolutionRepository;
pub use teachers::TeacherRepository;
pub use timetable::TimetableRepository;

/// Complete repository interface: sessions, teachers, and the resolution
/// audit log behind one object-safe boundary.
pub trait FullRepository:
    TimetableRepository + TeacherRepository + ResolutionRepository
{
}

impl<T> FullRepository for T where
    T: TimetableRepository + TeacherRepository + ResolutionRepository
{
}
