//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CoursesCommand, CoursesQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub courses: Arc<dyn CoursesCommand>,
    pub courses_query: Arc<dyn CoursesQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(courses: Arc<dyn CoursesCommand>, courses_query: Arc<dyn CoursesQuery>) -> Self {
        Self {
            courses,
            courses_query,
        }
    }

    /// Construct state from one value implementing both course ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use courses_api::domain::CourseService;
    /// use courses_api::inbound::http::state::HttpState;
    /// use courses_api::outbound::memory::InMemoryCourseRepository;
    ///
    /// let service = CourseService::new(Arc::new(InMemoryCourseRepository::default()));
    /// let _state = HttpState::from_service(Arc::new(service));
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: CoursesCommand + CoursesQuery + 'static,
    {
        Self {
            courses: service.clone(),
            courses_query: service,
        }
    }
}
