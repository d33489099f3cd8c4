//! User identity model: username, role set, and the persisted account.

use std::collections::BTreeSet;
use std::fmt;

/// Maximum allowed username length in characters.
pub const USERNAME_MAX: usize = 50;

/// Validation errors raised while building user fields from raw input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("Username is required")]
    EmptyUsername,
    #[error("Username must be at most {USERNAME_MAX} characters")]
    UsernameTooLong,
    #[error("Password is required")]
    EmptyPassword,
    #[error("At least one role is required")]
    EmptyRoles,
}

/// Unique login name for an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if username.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong);
        }
        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-empty set of role names attached to an account.
///
/// Role names are opaque capability labels; the API layer checks for
/// `"USER"` and `"ADMIN"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSet(BTreeSet<String>);

impl RoleSet {
    /// Build a role set from role names, rejecting an empty collection.
    pub fn new<I, S>(roles: I) -> Result<Self, UserValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roles: BTreeSet<String> = roles.into_iter().map(Into::into).collect();
        if roles.is_empty() {
            return Err(UserValidationError::EmptyRoles);
        }
        Ok(Self(roles))
    }

    /// The default role set assigned at signup when none is supplied.
    pub fn default_user() -> Self {
        Self(BTreeSet::from(["USER".to_owned()]))
    }

    /// Whether the set contains the named role.
    pub fn has(&self, role: &str) -> bool {
        self.0.contains(role)
    }

    /// Whether the set contains any of the named roles.
    pub fn has_any(&self, roles: &[&str]) -> bool {
        roles.iter().any(|role| self.has(role))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Role names in stable order, for serialisation.
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

/// Login credentials as supplied by the client, before verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    password: String,
}

impl Credentials {
    /// Validate the structural shape of a username/password pair.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, UserValidationError> {
        let username = Username::new(username)?;
        if password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self {
            username,
            password: password.to_owned(),
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Persisted user account.
///
/// The password is stored only as a salted hash; the plaintext never
/// round-trips through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: i64,
    username: Username,
    password_hash: String,
    roles: RoleSet,
}

impl User {
    /// Assemble a user from validated components.
    pub fn new(id: i64, username: Username, password_hash: String, roles: RoleSet) -> Self {
        Self {
            id,
            username,
            password_hash,
            roles,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }

    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }
}

/// Draft for a user record awaiting a store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: String,
    pub roles: RoleSet,
}
