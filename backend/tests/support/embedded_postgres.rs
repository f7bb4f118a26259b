//! Embedded PostgreSQL helpers for integration tests.
//!
//! - Each test gets a temporary database cloned from a template that already
//!   carries the embedded migrations, so suites never re-run DDL per test.
//! - Table teardown uses `postgres` directly so schema loss can be simulated
//!   outside the Diesel pool.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use courses_api::domain::ports::CourseRepositoryError;
use courses_api::outbound::persistence::MIGRATIONS;
use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::MigrationHarness;
use pg_embedded_setup_unpriv::test_support::hash_directory;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};
use uuid::Uuid;

use super::format_postgres_error;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "courses_template";

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

/// Template name keyed on the migrations directory hash so schema changes
/// produce a fresh template.
fn template_database_name() -> Result<String, CourseRepositoryError> {
    let hash = hash_directory(migrations_dir())
        .map_err(|err| CourseRepositoryError::query(format!("hash migrations: {err}")))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, CourseRepositoryError> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| CourseRepositoryError::query(format!("template check: {err:?}")))?;

    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| CourseRepositoryError::query(format!("create template: {err:?}")))?;

        let url = cluster.connection().database_url(&template_name);
        migrate_schema(&url)?;
    }

    Ok(template_name)
}

/// Provisions a temporary database cloned from the migration template.
pub fn provision_template_database(
    cluster: &ClusterHandle,
) -> Result<TemporaryDatabase, CourseRepositoryError> {
    let template_name = ensure_template_database(cluster)?;
    let db_name = format!("test_{}", Uuid::new_v4());
    cluster
        .temporary_database_from_template(db_name.as_str(), template_name.as_str())
        .map_err(|err| {
            CourseRepositoryError::query(format!("create database from template: {err:?}"))
        })
}

/// Runs all pending migrations against `url`.
pub fn migrate_schema(url: &str) -> Result<(), CourseRepositoryError> {
    let mut conn = PgConnection::establish(url)
        .map_err(|err| CourseRepositoryError::connection(format!("{err:?}")))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| CourseRepositoryError::query(format!("migration: {err:?}")))?;
    Ok(())
}

/// Drops the `courses` table from the database at `url`.
pub fn drop_courses_table(url: &str) -> Result<(), CourseRepositoryError> {
    let mut client = Client::connect(url, NoTls)
        .map_err(|err| CourseRepositoryError::connection(format_postgres_error(&err)))?;
    client
        .batch_execute("DROP TABLE IF EXISTS courses;")
        .map_err(|err| CourseRepositoryError::query(format_postgres_error(&err)))?;
    Ok(())
}

/// Inserts a row with an invalid stored name, bypassing domain validation.
pub fn insert_raw_course(url: &str, id: Uuid, name: &str) -> Result<(), CourseRepositoryError> {
    let mut client = Client::connect(url, NoTls)
        .map_err(|err| CourseRepositoryError::connection(format_postgres_error(&err)))?;
    client
        .execute(
            "INSERT INTO courses (id, name) VALUES ($1, $2)",
            &[&id, &name],
        )
        .map_err(|err| CourseRepositoryError::query(format_postgres_error(&err)))?;
    Ok(())
}
