//! Driving port for course mutations.

use async_trait::async_trait;

use crate::domain::{Course, CourseChanges, CourseDraft, CourseId, Error};

/// Domain use-case port for creating, changing and removing courses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoursesCommand: Send + Sync {
    /// Create a course and return the stored record.
    async fn create_course(&self, draft: CourseDraft) -> Result<Course, Error>;

    /// Apply `changes` to an existing course. Unknown ids yield `not_found`.
    async fn update_course(&self, id: &CourseId, changes: CourseChanges) -> Result<Course, Error>;

    /// Delete a course. Unknown ids yield `not_found`.
    async fn delete_course(&self, id: &CourseId) -> Result<(), Error>;
}
