//! Domain primitives, ports and services.
//!
//! Purpose: define strongly typed course records, the transport-agnostic
//! error payload and the ports adapters implement. Types are immutable once
//! validated; serialisation contracts are documented on each type.
//!
//! Public surface:
//! - Course, CourseId, CourseName: the course record and its fields.
//! - CourseDraft, CourseChanges, CourseFilter: inputs to course operations.
//! - CourseService: driving port implementation over a repository.
//! - Error, ErrorCode: API error payload and stable error identifier.
//! - TraceId: request-scoped correlation identifier.

pub mod course;
pub mod course_service;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::course::{
    COURSE_NAME_MAX, Course, CourseChanges, CourseDraft, CourseDto, CourseFilter, CourseId,
    CourseName, CourseValidationError,
};
pub use self::course_service::CourseService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use courses_api::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such course"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
