//! Authentication API handlers.
//!
//! ```text
//! POST /auth/signup {"username":"admin","password":"admin123"}
//! POST /auth/login  {"username":"admin","password":"admin123"}
//! ```
//!
//! Both endpoints are anonymous and return a bearer token plus the
//! account's role names.

use actix_web::{post, web, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{AuthOutcome, Signup};
use crate::domain::{Credentials, DomainError, RoleSet, UserValidationError};
use crate::inbound::http::error::{fail, ApiResult, ErrorEnvelope};
use crate::inbound::http::state::HttpState;

/// Registration request body for `POST /auth/signup`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    /// Role names to grant; defaults to `["USER"]` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

/// Login request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

/// Token and role names returned by both authentication endpoints.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub roles: Vec<String>,
}

impl From<AuthOutcome> for AuthResponse {
    fn from(outcome: AuthOutcome) -> Self {
        Self {
            token: outcome.token,
            roles: outcome.roles.to_vec(),
        }
    }
}

fn map_user_validation_error(error: UserValidationError) -> DomainError {
    DomainError::invalid_request(error.to_string())
}

impl TryFrom<SignupRequest> for Signup {
    type Error = UserValidationError;

    fn try_from(value: SignupRequest) -> Result<Self, Self::Error> {
        let credentials = Credentials::try_from_parts(&value.username, &value.password)?;
        let roles = value.roles.map(RoleSet::new).transpose()?;
        Ok(Self { credentials, roles })
    }
}

/// Register a new account and issue its first token.
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid request", body = ErrorEnvelope),
        (status = 409, description = "Username already exists", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup")]
pub async fn signup(
    req: HttpRequest,
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let signup = Signup::try_from(payload.into_inner())
        .map_err(map_user_validation_error)
        .map_err(fail(&req))?;
    let outcome = state.auth.signup(signup).await.map_err(fail(&req))?;
    Ok(web::Json(outcome.into()))
}

/// Verify credentials and issue a token.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = AuthRequest,
    responses(
        (status = 200, description = "Login success", body = AuthResponse),
        (status = 400, description = "Invalid request", body = ErrorEnvelope),
        (status = 401, description = "Invalid credentials", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    req: HttpRequest,
    state: web::Data<HttpState>,
    payload: web::Json<AuthRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let credentials = Credentials::try_from_parts(&payload.username, &payload.password)
        .map_err(map_user_validation_error)
        .map_err(fail(&req))?;
    let outcome = state.auth.login(credentials).await.map_err(fail(&req))?;
    Ok(web::Json(outcome.into()))
}
