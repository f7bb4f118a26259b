//! Driving port for course reads.
//!
//! Inbound adapters call this port to list and fetch courses without
//! depending on the persistence adapter behind it.

use async_trait::async_trait;

use crate::domain::{Course, CourseFilter, CourseId, Error};

/// Domain use-case port for reading courses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoursesQuery: Send + Sync {
    /// Return courses matching `filter` in insertion order.
    async fn list_courses(&self, filter: &CourseFilter) -> Result<Vec<Course>, Error>;

    /// Return one course or a `not_found` error.
    async fn get_course(&self, id: &CourseId) -> Result<Course, Error>;
}
