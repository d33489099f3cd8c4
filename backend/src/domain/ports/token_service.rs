//! Port abstraction for bearer-token issuance and validation.

use crate::domain::{RoleSet, Username};

/// Identity and capabilities decoded from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub username: Username,
    pub roles: RoleSet,
}

/// Errors raised by token adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenServiceError {
    /// Token could not be produced.
    #[error("token issuance failed: {message}")]
    Issue { message: String },

    /// Token failed signature, structure, or expiry checks.
    #[error("invalid token: {message}")]
    Invalid { message: String },
}

impl TokenServiceError {
    pub fn issue(message: impl Into<String>) -> Self {
        Self::Issue {
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Signed, time-bounded credential binding a username to its role set.
pub trait TokenService: Send + Sync {
    /// Issue a signed token for the given identity.
    fn issue(&self, username: &Username, roles: &RoleSet) -> Result<String, TokenServiceError>;

    /// Validate a token and decode the identity it carries.
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenServiceError>;
}
