//! Teacher repository trait.
//!
//! The resolver's substitute search consumes exactly one query from this
//! trait: teachers filtered by qualified subject, in store order.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::Teacher;

/// Repository trait for teacher records.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait TeacherRepository: Send + Sync {
    /// Store a new teacher.
    ///
    /// # Returns
    /// * `Ok(Teacher)` - The stored teacher including its assigned id
    /// * `Err(RepositoryError)` - If the operation fails
    async fn store_teacher(&self, teacher: &Teacher) -> RepositoryResult<Teacher>;

    /// List every teacher, in store order.
    async fn list_teachers(&self) -> RepositoryResult<Vec<Teacher>>;

    /// List teachers qualified to teach `subject`, in store order.
    ///
    /// The substitute search tries candidates in exactly this order; the
    /// first free one wins.
    async fn list_teachers_by_subject(&self, subject: &str) -> RepositoryResult<Vec<Teacher>>;
}
