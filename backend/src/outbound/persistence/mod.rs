//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories use `diesel-async` over a `bb8` pool. Row structs and the
//! schema stay private to this module; only domain types cross the boundary.
//!
//! # Example
//!
//! ```no_run
//! use courses_api::outbound::persistence::{DbPool, DieselCourseRepository, PoolConfig};
//!
//! # async fn build() -> Result<(), courses_api::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/courses")).await?;
//! let _repo = DieselCourseRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_course_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_course_repository::DieselCourseRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
