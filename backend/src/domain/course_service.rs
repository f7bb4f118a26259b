//! Course domain service.
//!
//! Implements the course driving ports on top of a [`CourseRepository`],
//! translating absent records into `not_found` errors and repository
//! failures into service-level error codes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CourseRepository, CourseRepositoryError, CoursesCommand, CoursesQuery,
};
use crate::domain::{Course, CourseChanges, CourseDraft, CourseFilter, CourseId, Error};

fn map_repository_error(error: CourseRepositoryError) -> Error {
    match error {
        CourseRepositoryError::Connection { message } => {
            warn!(%message, "course repository unavailable");
            Error::service_unavailable(format!("course repository unavailable: {message}"))
        }
        CourseRepositoryError::Query { message } => {
            warn!(%message, "course repository query failed");
            Error::internal(format!("course repository error: {message}"))
        }
    }
}

fn course_not_found(id: &CourseId) -> Error {
    Error::not_found(format!("course {id} not found"))
}

/// Course service implementing [`CoursesQuery`] and [`CoursesCommand`].
pub struct CourseService<R> {
    repository: Arc<R>,
}

impl<R> CourseService<R> {
    /// Create a service backed by `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> Clone for CourseService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[async_trait]
impl<R> CoursesQuery for CourseService<R>
where
    R: CourseRepository,
{
    async fn list_courses(&self, filter: &CourseFilter) -> Result<Vec<Course>, Error> {
        let courses = self
            .repository
            .list(filter)
            .await
            .map_err(map_repository_error)?;
        debug!(count = courses.len(), "listed courses");
        Ok(courses)
    }

    async fn get_course(&self, id: &CourseId) -> Result<Course, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| course_not_found(id))
    }
}

#[async_trait]
impl<R> CoursesCommand for CourseService<R>
where
    R: CourseRepository,
{
    async fn create_course(&self, draft: CourseDraft) -> Result<Course, Error> {
        let course = self
            .repository
            .insert(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(course_id = %course.id(), "course created");
        Ok(course)
    }

    async fn update_course(&self, id: &CourseId, changes: CourseChanges) -> Result<Course, Error> {
        let course = self
            .repository
            .update(id, &changes)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| course_not_found(id))?;
        info!(course_id = %id, "course updated");
        Ok(course)
    }

    async fn delete_course(&self, id: &CourseId) -> Result<(), Error> {
        let deleted = self
            .repository
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(course_not_found(id));
        }
        info!(course_id = %id, "course deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "course_service_tests.rs"]
mod tests;
