//! In-process `CourseRepository` used when no database is configured.
//!
//! Records live in a `Vec` guarded by a mutex, so insertion order is the
//! vector order. Data does not survive a restart.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseChanges, CourseDraft, CourseFilter, CourseId};

/// Mutex-guarded course store.
///
/// # Examples
/// ```
/// use courses_api::domain::{CourseDraft, CourseFilter, CourseName};
/// use courses_api::domain::ports::CourseRepository;
/// use courses_api::outbound::memory::InMemoryCourseRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = InMemoryCourseRepository::default();
/// let name = CourseName::new("Python").expect("valid name");
/// repo.insert(&CourseDraft::new(name)).await.expect("insert");
/// assert_eq!(repo.list(&CourseFilter::all()).await.expect("list").len(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCourseRepository {
    courses: Mutex<Vec<Course>>,
}

impl InMemoryCourseRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Vec<Course>>, CourseRepositoryError> {
        self.courses
            .lock()
            .map_err(|_| CourseRepositoryError::query("course store lock poisoned"))
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn list(&self, filter: &CourseFilter) -> Result<Vec<Course>, CourseRepositoryError> {
        let courses = self.lock()?;
        Ok(courses
            .iter()
            .filter(|course| filter.matches(course))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let courses = self.lock()?;
        Ok(courses.iter().find(|course| course.id() == id).cloned())
    }

    async fn insert(&self, draft: &CourseDraft) -> Result<Course, CourseRepositoryError> {
        let course = Course::new(CourseId::random(), draft.name.clone());
        self.lock()?.push(course.clone());
        Ok(course)
    }

    async fn update(
        &self,
        id: &CourseId,
        changes: &CourseChanges,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        let mut courses = self.lock()?;
        let Some(slot) = courses.iter_mut().find(|course| course.id() == id) else {
            return Ok(None);
        };
        *slot = slot.apply(changes);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: &CourseId) -> Result<bool, CourseRepositoryError> {
        let mut courses = self.lock()?;
        let before = courses.len();
        courses.retain(|course| course.id() != id);
        Ok(courses.len() < before)
    }
}
