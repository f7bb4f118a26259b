//! Builders for HTTP state backed by the configured repository.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use courses_api::domain::CourseService;
use courses_api::inbound::http::state::HttpState;
use courses_api::outbound::memory::InMemoryCourseRepository;
use courses_api::outbound::persistence::{DbPool, DieselCourseRepository};

/// Wire the course ports to PostgreSQL when a pool exists, otherwise to the
/// in-memory repository.
pub(crate) fn build_http_state(db_pool: Option<&DbPool>) -> web::Data<HttpState> {
    let state = match db_pool {
        Some(pool) => {
            info!("course repository: postgres");
            let repository = Arc::new(DieselCourseRepository::new(pool.clone()));
            HttpState::from_service(Arc::new(CourseService::new(repository)))
        }
        None => {
            info!("course repository: in-memory");
            let repository = Arc::new(InMemoryCourseRepository::default());
            HttpState::from_service(Arc::new(CourseService::new(repository)))
        }
    };
    web::Data::new(state)
}
