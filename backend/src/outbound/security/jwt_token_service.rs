//! HMAC-signed JWT implementation of the token port.
//!
//! Tokens carry the username as `sub`, the role names, and issue/expiry
//! timestamps. Verification rejects bad signatures, malformed tokens, and
//! anything past its expiry.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenClaims, TokenService, TokenServiceError};
use crate::domain::{RoleSet, Username};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    roles: Vec<String>,
    iat: i64,
    exp: i64,
}

/// Token adapter signing with HS256 over a shared secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtTokenService {
    /// Create a service from the shared secret and token lifetime.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, username: &Username, roles: &RoleSet) -> Result<String, TokenServiceError> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.as_str().to_owned(),
            roles: roles.to_vec(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|error| TokenServiceError::issue(error.to_string()))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenServiceError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|error| TokenServiceError::invalid(error.to_string()))?;

        let username = Username::new(data.claims.sub)
            .map_err(|error| TokenServiceError::invalid(error.to_string()))?;
        let roles = RoleSet::new(data.claims.roles)
            .map_err(|error| TokenServiceError::invalid(error.to_string()))?;
        Ok(TokenClaims { username, roles })
    }
}
