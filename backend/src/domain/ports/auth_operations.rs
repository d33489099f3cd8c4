//! Driving port for authentication, consumed by the HTTP adapter.

use async_trait::async_trait;

use crate::domain::{Credentials, DomainError, RoleSet};

/// Registration payload: credentials plus an optional explicit role set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signup {
    pub credentials: Credentials,
    pub roles: Option<RoleSet>,
}

/// Result of a successful signup or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub token: String,
    pub roles: RoleSet,
}

/// Authentication operations exposed to inbound adapters.
#[async_trait]
pub trait AuthOperations: Send + Sync {
    /// Register a new account and issue its first token.
    async fn signup(&self, signup: Signup) -> Result<AuthOutcome, DomainError>;

    /// Verify credentials and issue a token.
    async fn login(&self, credentials: Credentials) -> Result<AuthOutcome, DomainError>;
}
