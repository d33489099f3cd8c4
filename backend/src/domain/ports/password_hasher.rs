//! Port abstraction for password hashing.
//!
//! The concrete algorithm lives in an outbound adapter; the domain only
//! needs encode and verify operations over opaque hash strings.

/// Errors raised by password hashing adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    #[error("password hashing failed: {message}")]
    Hash { message: String },

    #[error("password verification failed: {message}")]
    Verify { message: String },
}

impl PasswordHashError {
    pub fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }

    pub fn verify(message: impl Into<String>) -> Self {
        Self::Verify {
            message: message.into(),
        }
    }
}

/// Salted password hashing with verification.
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted hash suitable for storage.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// A structurally valid hash that does not match yields `Ok(false)`;
    /// errors are reserved for malformed hashes and adapter failures.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError>;
}
