//! PostgreSQL-backed `CourseRepository` implementation using Diesel ORM.
//!
//! Identifiers come from the `gen_random_uuid()` column default and list
//! order follows `(created_at, id)`, which reproduces insertion order.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseChanges, CourseDraft, CourseFilter, CourseId, CourseName};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CourseRow, CourseUpdate, NewCourseRow};
use super::pool::{DbPool, PoolError};
use super::schema::courses;

/// Diesel-backed implementation of the course repository port.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CourseRepositoryError {
    map_basic_pool_error(error, CourseRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CourseRepositoryError {
    map_basic_diesel_error(
        error,
        CourseRepositoryError::query,
        CourseRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain course.
fn row_to_course(row: CourseRow) -> Result<Course, CourseRepositoryError> {
    let name = CourseName::new(row.name).map_err(|err| {
        CourseRepositoryError::query(format!("stored course {} is invalid: {err}", row.id))
    })?;
    Ok(Course::new(CourseId::from_uuid(row.id), name))
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn list(&self, filter: &CourseFilter) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = courses::table
            .select(CourseRow::as_select())
            .order_by((courses::created_at.asc(), courses::id.asc()))
            .into_boxed();
        if let Some(id) = filter.id.as_ref() {
            query = query.filter(courses::id.eq(*id.as_uuid()));
        }
        if let Some(name) = filter.name.as_deref() {
            query = query.filter(courses::name.eq(name));
        }

        let rows: Vec<CourseRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_course).collect()
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = courses::table
            .filter(courses::id.eq(id.as_uuid()))
            .select(CourseRow::as_select())
            .first::<CourseRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_course).transpose()
    }

    async fn insert(&self, draft: &CourseDraft) -> Result<Course, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(courses::table)
            .values(&NewCourseRow {
                name: draft.name.as_ref(),
            })
            .returning(CourseRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_course(row)
    }

    async fn update(
        &self,
        id: &CourseId,
        changes: &CourseChanges,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        // Diesel rejects empty changesets.
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(courses::table.filter(courses::id.eq(id.as_uuid())))
            .set(&CourseUpdate {
                name: changes.name.as_ref().map(AsRef::as_ref),
            })
            .returning(CourseRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_course).transpose()
    }

    async fn delete(&self, id: &CourseId) -> Result<bool, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(courses::table.filter(courses::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
