//! Tests for course HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockCoursesCommand, MockCoursesQuery};
use crate::domain::{CourseService, Error};
use crate::inbound::http::extractors::configure_extractors;
use crate::outbound::memory::InMemoryCourseRepository;

fn app_with_state(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .configure(configure_extractors)
            .configure(configure_courses),
    )
}

fn in_memory_state() -> HttpState {
    let service = CourseService::new(Arc::new(InMemoryCourseRepository::default()));
    HttpState::from_service(Arc::new(service))
}

fn mocked_state(command: MockCoursesCommand, query: MockCoursesQuery) -> HttpState {
    HttpState::new(Arc::new(command), Arc::new(query))
}

async fn create(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    name: &str,
) -> Value {
    let req = actix_test::TestRequest::post()
        .uri("/api/v1/courses/")
        .set_json(json!({ "name": name }))
        .to_request();
    let res = actix_test::call_service(app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    actix_test::read_body_json(res).await
}

#[actix_web::test]
async fn create_accepts_form_encoded_bodies() {
    let app = actix_test::init_service(app_with_state(in_memory_state())).await;

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/courses/")
        .set_form([("name", "Python")])
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["name"], "Python");
    assert!(body["id"].as_str().is_some_and(|id| id.parse::<uuid::Uuid>().is_ok()));
}

#[actix_web::test]
async fn create_ignores_client_supplied_id() {
    let app = actix_test::init_service(app_with_state(in_memory_state())).await;

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/courses/")
        .set_json(json!({ "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "name": "Go" }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_ne!(body["id"], "3fa85f64-5717-4562-b3fc-2c963f66afa6");
}

#[rstest]
#[case(json!({}), "missing_field")]
#[case(json!({ "name": "  " }), "blank")]
#[case(json!({ "name": "x".repeat(257) }), "too_long")]
#[actix_web::test]
async fn create_rejects_invalid_names(#[case] payload: Value, #[case] code: &str) {
    let app = actix_test::init_service(app_with_state(in_memory_state())).await;

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/courses/")
        .set_json(payload)
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"], json!({ "field": "name", "code": code }));
}

#[actix_web::test]
async fn patch_without_fields_returns_course_unchanged() {
    let app = actix_test::init_service(app_with_state(in_memory_state())).await;
    let created = create(&app, "Python").await;
    let id = created["id"].as_str().expect("id");

    let req = actix_test::TestRequest::patch()
        .uri(&format!("/api/v1/courses/{id}/"))
        .set_json(json!({}))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, created);
}

#[actix_web::test]
async fn put_requires_name() {
    let app = actix_test::init_service(app_with_state(in_memory_state())).await;
    let created = create(&app, "Python").await;
    let id = created["id"].as_str().expect("id");

    let req = actix_test::TestRequest::put()
        .uri(&format!("/api/v1/courses/{id}/"))
        .set_json(json!({}))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn put_replaces_name() {
    let app = actix_test::init_service(app_with_state(in_memory_state())).await;
    let created = create(&app, "Python").await;
    let id = created["id"].as_str().expect("id");

    let req = actix_test::TestRequest::put()
        .uri(&format!("/api/v1/courses/{id}/"))
        .set_form([("name", "Rust")])
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({ "id": id, "name": "Rust" }));
}

#[rstest]
#[case("/api/v1/courses/not-a-uuid/")]
#[case("/api/v1/courses/3fa85f64-5717-4562-b3fc-2c963f66afa6/")]
#[actix_web::test]
async fn unknown_or_malformed_ids_are_not_found(#[case] uri: &str) {
    let app = actix_test::init_service(app_with_state(in_memory_state())).await;

    let req = actix_test::TestRequest::get().uri(uri).to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "not_found");
}

#[actix_web::test]
async fn malformed_id_filter_is_rejected() {
    let app = actix_test::init_service(app_with_state(in_memory_state())).await;

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/courses/?id=abc")
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"], json!({ "field": "id", "code": "invalid_uuid" }));
}

#[actix_web::test]
async fn list_passes_combined_filter_to_query_port() {
    let mut query = MockCoursesQuery::new();
    query
        .expect_list_courses()
        .withf(|filter| filter.id.is_some() && filter.name.as_deref() == Some("Python"))
        .times(1)
        .return_once(|_| Ok(Vec::new()));
    let app = actix_test::init_service(app_with_state(mocked_state(
        MockCoursesCommand::new(),
        query,
    )))
    .await;

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/courses/?id=3fa85f64-5717-4562-b3fc-2c963f66afa6&name=Python")
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn unavailable_repository_surfaces_as_503() {
    let mut command = MockCoursesCommand::new();
    command
        .expect_create_course()
        .return_once(|_| Err(Error::service_unavailable("course repository unavailable")));
    let app = actix_test::init_service(app_with_state(mocked_state(
        command,
        MockCoursesQuery::new(),
    )))
    .await;

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/courses/")
        .set_json(json!({ "name": "Python" }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "service_unavailable");
}

#[rstest]
#[case("?name=")]
#[case("?id=")]
#[case("?id=&name=")]
#[case("?name=%20%20")]
#[actix_web::test]
async fn blank_filters_are_ignored(#[case] query: &str) {
    let app = actix_test::init_service(app_with_state(in_memory_state())).await;
    let python = create(&app, "Python").await;
    let rust = create(&app, "Rust").await;

    let req = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/courses/{query}"))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!([python, rust]));
}

#[actix_web::test]
async fn create_stores_trimmed_name() {
    let app = actix_test::init_service(app_with_state(in_memory_state())).await;

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/courses/")
        .set_form([("name", "  Go  ")])
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["name"], "Go");
}

#[actix_web::test]
async fn create_rejects_nul_characters() {
    let app = actix_test::init_service(app_with_state(in_memory_state())).await;

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/courses/")
        .set_json(json!({ "name": "a\u{0}b" }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"], json!({ "field": "name", "code": "null_character" }));
}

#[actix_web::test]
async fn name_filter_with_nul_is_rejected_before_reaching_the_port() {
    let app = actix_test::init_service(app_with_state(mocked_state(
        MockCoursesCommand::new(),
        MockCoursesQuery::new(),
    )))
    .await;

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/courses/?name=a%00b")
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"], json!({ "field": "name", "code": "null_character" }));
}

#[actix_web::test]
async fn patch_without_body_returns_course_unchanged() {
    let app = actix_test::init_service(app_with_state(in_memory_state())).await;
    let created = create(&app, "Python").await;
    let id = created["id"].as_str().expect("id");

    let req = actix_test::TestRequest::patch()
        .uri(&format!("/api/v1/courses/{id}/"))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, created);
}

#[rstest]
#[case(actix_test::TestRequest::patch())]
#[case(actix_test::TestRequest::patch().set_json(json!({ "name": "  " })))]
#[case(actix_test::TestRequest::put())]
#[case(actix_test::TestRequest::put().set_json(json!({})))]
#[actix_web::test]
async fn unknown_course_is_not_found_before_body_validation(
    #[case] request: actix_test::TestRequest,
) {
    let app = actix_test::init_service(app_with_state(in_memory_state())).await;

    let req = request
        .uri("/api/v1/courses/00000000-0000-0000-0000-000000000000/")
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "not_found");
}
