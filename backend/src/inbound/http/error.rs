//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn domain failures into the structured error envelope every
//! endpoint shares.

use actix_web::{http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{DomainError, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Structured body returned for every failed request.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    /// Moment the failure was observed, UTC.
    pub timestamp: DateTime<Utc>,
    /// Numeric HTTP status, duplicated in the body for log scraping.
    pub status: u16,
    /// Human-readable status label, e.g. `"Not Found"`.
    pub error: String,
    /// Failure detail safe to show to clients.
    pub message: String,
    /// Path of the request that failed.
    pub path: String,
}

/// A domain error bound to the request path it occurred on.
#[derive(Debug, Clone)]
pub struct ApiError {
    error: DomainError,
    path: String,
}

impl ApiError {
    pub fn new(error: DomainError, path: impl Into<String>) -> Self {
        Self {
            error,
            path: path.into(),
        }
    }

    /// Bind a domain error to the path of the request being handled.
    pub fn from_request(error: DomainError, req: &HttpRequest) -> Self {
        Self::new(error, req.path())
    }

    pub fn code(&self) -> ErrorCode {
        self.error.code()
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        let status = status_for(self.error.code());
        ErrorEnvelope {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: label_for(self.error.code()).to_owned(),
            message: client_message(&self.error).to_owned(),
            path: self.path.clone(),
        }
    }
}

/// Curried mapper so handlers read `.map_err(fail(&req))`.
pub fn fail(req: &HttpRequest) -> impl Fn(DomainError) -> ApiError + '_ {
    move |error| ApiError::from_request(error, req)
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::ValidationFailed | ErrorCode::OperationFailed => {
            StatusCode::BAD_REQUEST
        }
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn label_for(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::OperationFailed => "Bad Request",
        ErrorCode::ValidationFailed => "Validation Failed",
        ErrorCode::Unauthorized => "Unauthorized",
        ErrorCode::Forbidden => "Forbidden",
        ErrorCode::NotFound => "Not Found",
        ErrorCode::Conflict => "Conflict",
        ErrorCode::InternalError => "Internal Server Error",
    }
}

/// Internal failures keep their detail in the logs, not the response.
fn client_message(error: &DomainError) -> &str {
    if matches!(error.code(), ErrorCode::InternalError) {
        "An unexpected error occurred"
    } else {
        error.message()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(self.error.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.error.code(), ErrorCode::InternalError) {
            error!(message = %self.error.message(), path = %self.path, "internal error");
        }
        HttpResponse::build(self.status_code()).json(self.envelope())
    }
}
