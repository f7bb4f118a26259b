//! Course HTTP handlers.
//!
//! ```text
//! GET    /api/v1/courses/
//! POST   /api/v1/courses/
//! GET    /api/v1/courses/{id}/
//! PATCH  /api/v1/courses/{id}/
//! PUT    /api/v1/courses/{id}/
//! DELETE /api/v1/courses/{id}/
//! ```
//!
//! Create and update accept either JSON or form-encoded bodies. Unknown body
//! fields, including a client-supplied `id`, are ignored. Update and replace
//! accept a missing body, which changes nothing.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{
    Either, FromRequest, HttpRequest, HttpResponse, delete, get, patch, post, put, web,
};
use futures_util::future::{LocalBoxFuture, ready};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Course, CourseChanges, CourseDraft, CourseFilter, CourseId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{CourseSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    filter_value, parse_course_id_filter, parse_course_id_path, parse_course_name_filter,
    parse_optional_course_name, parse_required_course_name,
};

/// Exact-match filters for listing courses. Both filters combine with AND.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseListQuery {
    /// Only return the course with this UUID.
    pub id: Option<String>,
    /// Only return courses whose name matches exactly (case-sensitive).
    pub name: Option<String>,
}

/// Request payload for creating or changing a course.
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
pub struct CourseRequestBody {
    /// Course name. Required on create and replace, optional on patch.
    #[schema(example = "Python", max_length = 256)]
    pub name: Option<String>,
}

/// JSON or form-encoded course body.
pub type CoursePayload = Either<web::Json<CourseRequestBody>, web::Form<CourseRequestBody>>;

fn into_body(payload: CoursePayload) -> CourseRequestBody {
    match payload {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    }
}

/// Course body that may be absent.
///
/// A request with `Content-Length: 0`, or with neither a length, a transfer
/// encoding nor a content type, extracts as an empty body instead of failing
/// content-type negotiation.
#[derive(Debug, Default)]
pub struct OptionalCoursePayload(pub CourseRequestBody);

fn has_empty_body(req: &HttpRequest) -> bool {
    let headers = req.headers();
    match headers.get(header::CONTENT_LENGTH) {
        Some(length) => length.to_str().is_ok_and(|value| value.trim() == "0"),
        None => {
            !headers.contains_key(header::TRANSFER_ENCODING)
                && !headers.contains_key(header::CONTENT_TYPE)
        }
    }
}

impl FromRequest for OptionalCoursePayload {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if has_empty_body(req) {
            return Box::pin(ready(Ok(Self::default())));
        }
        let body = CoursePayload::from_request(req, payload);
        Box::pin(async move {
            body.await
                .map(|payload| Self(into_body(payload)))
                .map_err(actix_web::Error::from)
        })
    }
}

impl CourseListQuery {
    fn into_filter(self) -> ApiResult<CourseFilter> {
        let mut filter = CourseFilter::all();
        if let Some(id) = filter_value(self.id) {
            filter = filter.with_id(parse_course_id_filter(&id)?);
        }
        if let Some(name) = filter_value(self.name) {
            filter = filter.with_name(parse_course_name_filter(name)?);
        }
        Ok(filter)
    }
}

/// Surface `not_found` for a missing course ahead of body validation errors.
async fn validated_for<T>(state: &HttpState, id: &CourseId, parsed: ApiResult<T>) -> ApiResult<T> {
    if parsed.is_err() {
        state.courses_query.get_course(id).await?;
    }
    parsed
}

/// List courses in insertion order, optionally filtered.
#[utoipa::path(
    get,
    path = "/api/v1/courses/",
    params(CourseListQuery),
    responses(
        (status = 200, description = "Courses", body = [CourseSchema]),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "listCourses"
)]
#[get("/courses/")]
pub async fn list_courses(
    state: web::Data<HttpState>,
    query: web::Query<CourseListQuery>,
) -> ApiResult<web::Json<Vec<Course>>> {
    let filter = query.into_inner().into_filter()?;
    let courses = state.courses_query.list_courses(&filter).await?;
    Ok(web::Json(courses))
}

/// Fetch one course.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}/",
    params(("id" = String, Path, description = "Course UUID")),
    responses(
        (status = 200, description = "Course", body = CourseSchema),
        (status = 404, description = "Course not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "getCourse"
)]
#[get("/courses/{id}/")]
pub async fn get_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Course>> {
    let id = parse_course_id_path(&path)?;
    let course = state.courses_query.get_course(&id).await?;
    Ok(web::Json(course))
}

/// Create a course. The identifier is assigned by the store.
#[utoipa::path(
    post,
    path = "/api/v1/courses/",
    request_body(
        description = "Course fields",
        content(
            (CourseRequestBody = "application/json"),
            (CourseRequestBody = "application/x-www-form-urlencoded")
        )
    ),
    responses(
        (status = 201, description = "Course created", body = CourseSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/courses/")]
pub async fn create_course(
    state: web::Data<HttpState>,
    payload: CoursePayload,
) -> ApiResult<HttpResponse> {
    let name = parse_required_course_name(into_body(payload).name)?;
    let course = state.courses.create_course(CourseDraft::new(name)).await?;
    Ok(HttpResponse::Created().json(course))
}

/// Change the supplied fields of a course.
#[utoipa::path(
    patch,
    path = "/api/v1/courses/{id}/",
    params(("id" = String, Path, description = "Course UUID")),
    request_body(
        description = "Fields to change",
        content(
            (CourseRequestBody = "application/json"),
            (CourseRequestBody = "application/x-www-form-urlencoded")
        )
    ),
    responses(
        (status = 200, description = "Course updated", body = CourseSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "updateCourse"
)]
#[patch("/courses/{id}/")]
pub async fn update_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: OptionalCoursePayload,
) -> ApiResult<web::Json<Course>> {
    let id = parse_course_id_path(&path)?;
    let name = validated_for(&state, &id, parse_optional_course_name(payload.0.name)).await?;
    let changes = CourseChanges { name };
    let course = state.courses.update_course(&id, changes).await?;
    Ok(web::Json(course))
}

/// Replace every field of a course.
#[utoipa::path(
    put,
    path = "/api/v1/courses/{id}/",
    params(("id" = String, Path, description = "Course UUID")),
    request_body(
        description = "Complete course fields",
        content(
            (CourseRequestBody = "application/json"),
            (CourseRequestBody = "application/x-www-form-urlencoded")
        )
    ),
    responses(
        (status = 200, description = "Course replaced", body = CourseSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "replaceCourse"
)]
#[put("/courses/{id}/")]
pub async fn replace_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: OptionalCoursePayload,
) -> ApiResult<web::Json<Course>> {
    let id = parse_course_id_path(&path)?;
    let name = validated_for(&state, &id, parse_required_course_name(payload.0.name)).await?;
    let course = state
        .courses
        .update_course(&id, CourseChanges::rename(name))
        .await?;
    Ok(web::Json(course))
}

/// Delete a course.
#[utoipa::path(
    delete,
    path = "/api/v1/courses/{id}/",
    params(("id" = String, Path, description = "Course UUID")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "Course not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "deleteCourse"
)]
#[delete("/courses/{id}/")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_course_id_path(&path)?;
    state.courses.delete_course(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register every course handler on `cfg`.
pub fn configure_courses(cfg: &mut web::ServiceConfig) {
    cfg.service(list_courses)
        .service(create_course)
        .service(get_course)
        .service(update_course)
        .service(replace_course)
        .service(delete_course);
}

#[cfg(test)]
#[path = "courses_tests.rs"]
mod tests;
