//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod bearer;
pub mod cases;
pub mod error;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::{error as actix_error, web, HttpRequest};

use crate::domain::DomainError;
pub use error::{ApiError, ApiResult, ErrorEnvelope};

fn json_error_handler(
    err: actix_error::JsonPayloadError,
    req: &HttpRequest,
) -> actix_web::Error {
    ApiError::from_request(
        DomainError::validation_failed(format!("Invalid JSON format: {err}")),
        req,
    )
    .into()
}

fn path_error_handler(err: actix_error::PathError, req: &HttpRequest) -> actix_web::Error {
    ApiError::from_request(
        DomainError::validation_failed(format!("Invalid path parameter: {err}")),
        req,
    )
    .into()
}

fn query_error_handler(err: actix_error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    ApiError::from_request(
        DomainError::validation_failed(format!("Invalid query parameter: {err}")),
        req,
    )
    .into()
}

/// Register every route plus the extractor error handlers that route
/// malformed payloads into the shared error envelope.
///
/// Shared between the server and in-process test apps so both exercise the
/// same table.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(auth::signup)
        .service(auth::login)
        .service(cases::list_cases)
        .service(cases::get_case)
        .service(cases::create_case)
        .service(cases::update_case)
        .service(cases::delete_case);
}
