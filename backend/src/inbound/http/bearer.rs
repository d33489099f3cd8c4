//! Bearer-token extractor for protected routes.
//!
//! Declaring an [`AuthenticatedUser`] parameter on a handler makes token
//! verification happen before the handler body runs; a missing or invalid
//! token short-circuits into the shared error envelope.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use tracing::debug;

use crate::domain::ports::TokenClaims;
use crate::domain::{DomainError, RoleSet, Username};
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;

/// Role name granting read and create access to cases.
pub const ROLE_USER: &str = "USER";
/// Role name granting full case access.
pub const ROLE_ADMIN: &str = "ADMIN";

/// Verified identity extracted from the `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    claims: TokenClaims,
}

impl AuthenticatedUser {
    pub fn username(&self) -> &Username {
        &self.claims.username
    }

    pub fn roles(&self) -> &RoleSet {
        &self.claims.roles
    }

    /// Require one named role, failing with a forbidden error.
    pub fn require_role(&self, role: &str) -> Result<(), DomainError> {
        if self.claims.roles.has(role) {
            Ok(())
        } else {
            Err(DomainError::forbidden("Access denied"))
        }
    }

    /// Require at least one of the named roles.
    pub fn require_any_role(&self, roles: &[&str]) -> Result<(), DomainError> {
        if self.claims.roles.has_any(roles) {
            Ok(())
        } else {
            Err(DomainError::forbidden("Access denied"))
        }
    }
}

fn extract(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    let state = req.app_data::<web::Data<HttpState>>().ok_or_else(|| {
        ApiError::from_request(DomainError::internal("http state not configured"), req)
    })?;

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let token = header_value
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ApiError::from_request(
                DomainError::unauthorized("Missing or invalid Authorization header"),
                req,
            )
        })?;

    let claims = state.tokens.verify(token).map_err(|error| {
        debug!(error = %error, "token rejected");
        ApiError::from_request(DomainError::unauthorized("Invalid or expired token"), req)
    })?;
    Ok(AuthenticatedUser { claims })
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}
