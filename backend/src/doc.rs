//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the course endpoints, the health probes and the
//! schema wrappers from `inbound::http::schemas`. Swagger UI serves it in
//! debug builds and `cargo run --bin openapi-dump` prints it.

use utoipa::OpenApi;

use crate::inbound::http::courses::CourseRequestBody;
use crate::inbound::http::schemas::{CourseSchema, ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Courses API",
        description = "CRUD interface for course records and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::courses::replace_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(CourseSchema, CourseRequestBody, ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "courses", description = "Course records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
