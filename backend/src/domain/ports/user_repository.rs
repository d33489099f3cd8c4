//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewUser, User, Username};

/// Persistence errors raised by user store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Store connection could not be established.
    #[error("user store connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query { message: String },

    /// The store's uniqueness constraint on the username fired.
    #[error("username already exists: {username}")]
    DuplicateUsername { username: String },
}

impl UserPersistenceError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    pub fn duplicate(username: impl Into<String>) -> Self {
        Self::DuplicateUsername {
            username: username.into(),
        }
    }
}

/// Store operations the authentication service depends on.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by login name.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Persist a new account, returning it with its assigned identifier.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;
}
