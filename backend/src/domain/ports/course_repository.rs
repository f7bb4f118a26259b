//! Driven port for course persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Course, CourseChanges, CourseDraft, CourseFilter, CourseId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by course repository adapters.
    pub enum CourseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "course repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "course repository query failed: {message}",
    }
}

/// Storage operations for course records.
///
/// Implementations return courses in insertion order and assign identifiers
/// on insert.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// List courses matching `filter`, oldest first.
    async fn list(&self, filter: &CourseFilter) -> Result<Vec<Course>, CourseRepositoryError>;

    /// Fetch a course by identifier.
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError>;

    /// Persist a new course and return it with its assigned identifier.
    async fn insert(&self, draft: &CourseDraft) -> Result<Course, CourseRepositoryError>;

    /// Apply `changes` to an existing course.
    ///
    /// Returns `Ok(None)` when no course has the given identifier.
    async fn update(
        &self,
        id: &CourseId,
        changes: &CourseChanges,
    ) -> Result<Option<Course>, CourseRepositoryError>;

    /// Remove a course. Returns `false` when nothing was deleted.
    async fn delete(&self, id: &CourseId) -> Result<bool, CourseRepositoryError>;
}
