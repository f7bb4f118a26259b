//! Extractor configuration for request payloads.
//!
//! Actix answers malformed JSON, form and query payloads with plain-text
//! errors by default. These handlers turn them into domain
//! `invalid_request` errors so every failure shares one JSON shape.

use actix_web::error::{JsonPayloadError, QueryPayloadError, UrlencodedError};
use actix_web::{HttpRequest, web};
use tracing::debug;

use crate::domain::Error;

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected JSON payload");
    Error::invalid_request(format!("invalid JSON payload: {err}")).into()
}

fn form_error(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected form payload");
    Error::invalid_request(format!("invalid form payload: {err}")).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected query string");
    Error::invalid_request(format!("invalid query string: {err}")).into()
}

/// Register JSON, form and query extractor error handlers.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use courses_api::inbound::http::extractors::configure_extractors;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_extractors));
/// ```
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::FormConfig::default().error_handler(form_error))
        .app_data(web::QueryConfig::default().error_handler(query_error));
}
