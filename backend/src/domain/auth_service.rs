//! Authentication service: account registration and credential login,
//! issuing bearer tokens through the token port.
//!
//! Login failures are deliberately uniform: an unknown username and a wrong
//! password both surface as the same unauthorized error, so the response
//! never reveals which accounts exist.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    AuthOperations, AuthOutcome, PasswordHashError, PasswordHasher, Signup, TokenService,
    TokenServiceError, UserPersistenceError, UserRepository,
};
use crate::domain::{Credentials, DomainError, NewUser, RoleSet, User};

/// Domain service implementing the authentication driving port.
#[derive(Clone)]
pub struct AuthenticationService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl AuthenticationService {
    /// Create a new service over the given user store, hasher, and token
    /// issuer.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    fn issue_outcome(&self, user: &User) -> Result<AuthOutcome, DomainError> {
        let token = self
            .tokens
            .issue(user.username(), user.roles())
            .map_err(map_token_error)?;
        Ok(AuthOutcome {
            token,
            roles: user.roles().clone(),
        })
    }
}

fn invalid_credentials() -> DomainError {
    DomainError::unauthorized("Invalid credentials")
}

fn duplicate_username_error(username: &str) -> DomainError {
    DomainError::conflict(format!("Username already exists: {username}"))
}

fn map_store_error(error: UserPersistenceError, wrap_message: &str) -> DomainError {
    match error {
        UserPersistenceError::DuplicateUsername { username } => duplicate_username_error(&username),
        UserPersistenceError::Connection { message } | UserPersistenceError::Query { message } => {
            error!(error = %message, "user store operation failed");
            DomainError::operation_failed(wrap_message)
        }
    }
}

fn map_hash_error(error: &PasswordHashError) -> DomainError {
    error!(error = %error, "password hashing failed");
    DomainError::internal("password hashing failed")
}

fn map_token_error(error: TokenServiceError) -> DomainError {
    error!(error = %error, "token issuance failed");
    DomainError::internal("token issuance failed")
}

#[async_trait]
impl AuthOperations for AuthenticationService {
    async fn signup(&self, signup: Signup) -> Result<AuthOutcome, DomainError> {
        let username = signup.credentials.username().clone();
        info!(username = %username, "registering user");

        let existing = self
            .users
            .find_by_username(&username)
            .await
            .map_err(|err| map_store_error(err, "Failed to register user"))?;
        if existing.is_some() {
            return Err(duplicate_username_error(username.as_str()));
        }

        let password_hash = self
            .hasher
            .hash(signup.credentials.password())
            .map_err(|err| map_hash_error(&err))?;
        let roles = signup.roles.unwrap_or_else(RoleSet::default_user);
        let new_user = NewUser {
            username,
            password_hash,
            roles,
        };

        let user = self
            .users
            .insert(&new_user)
            .await
            .map_err(|err| map_store_error(err, "Failed to register user"))?;
        info!(username = %user.username(), "registered user");
        self.issue_outcome(&user)
    }

    async fn login(&self, credentials: Credentials) -> Result<AuthOutcome, DomainError> {
        info!(username = %credentials.username(), "authenticating user");

        let user = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(|err| map_store_error(err, "Failed to authenticate user"))?
            .ok_or_else(invalid_credentials)?;

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .map_err(|err| map_hash_error(&err))?;
        if !matches {
            return Err(invalid_credentials());
        }

        info!(username = %user.username(), "authenticated user");
        self.issue_outcome(&user)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::domain::ports::{TokenClaims, UserRepository};
    use crate::domain::{ErrorCode, Username};

    #[derive(Default)]
    struct StubUserRepository {
        state: Mutex<StubState>,
    }

    #[derive(Default)]
    struct StubState {
        users: Vec<User>,
        next_id: i64,
        failure: Option<UserPersistenceError>,
    }

    impl StubUserRepository {
        fn failing(failure: UserPersistenceError) -> Self {
            Self {
                state: Mutex::new(StubState {
                    failure: Some(failure),
                    ..StubState::default()
                }),
            }
        }
    }

    #[async_trait]
    impl UserRepository for StubUserRepository {
        async fn find_by_username(
            &self,
            username: &Username,
        ) -> Result<Option<User>, UserPersistenceError> {
            let state = self.state.lock().expect("state lock");
            if let Some(failure) = state.failure.clone() {
                return Err(failure);
            }
            Ok(state
                .users
                .iter()
                .find(|user| user.username() == username)
                .cloned())
        }

        async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
            let mut state = self.state.lock().expect("state lock");
            if let Some(failure) = state.failure.clone() {
                return Err(failure);
            }
            if state
                .users
                .iter()
                .any(|existing| existing.username() == &user.username)
            {
                return Err(UserPersistenceError::duplicate(user.username.as_str()));
            }
            state.next_id += 1;
            let stored = User::new(
                state.next_id,
                user.username.clone(),
                user.password_hash.clone(),
                user.roles.clone(),
            );
            state.users.push(stored.clone());
            Ok(stored)
        }
    }

    /// Reversible stand-in hash so tests need no real key derivation.
    struct StubHasher;

    impl PasswordHasher for StubHasher {
        fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
            Ok(format!("hashed:{password}"))
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
            Ok(hash == format!("hashed:{password}"))
        }
    }

    struct StubTokenService;

    impl TokenService for StubTokenService {
        fn issue(
            &self,
            username: &Username,
            _roles: &RoleSet,
        ) -> Result<String, TokenServiceError> {
            Ok(format!("token-for-{}", username.as_str()))
        }

        fn verify(&self, _token: &str) -> Result<TokenClaims, TokenServiceError> {
            Err(TokenServiceError::invalid("not supported in stub"))
        }
    }

    fn service_with(users: StubUserRepository) -> AuthenticationService {
        AuthenticationService::new(
            Arc::new(users),
            Arc::new(StubHasher),
            Arc::new(StubTokenService),
        )
    }

    fn service() -> AuthenticationService {
        service_with(StubUserRepository::default())
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials::try_from_parts(username, password).expect("valid credentials")
    }

    fn signup(username: &str, password: &str) -> Signup {
        Signup {
            credentials: credentials(username, password),
            roles: None,
        }
    }

    #[tokio::test]
    async fn signup_defaults_to_the_user_role_and_issues_a_token() {
        let outcome = service()
            .signup(signup("alice", "secret"))
            .await
            .expect("signup succeeds");
        assert_eq!(outcome.token, "token-for-alice");
        assert_eq!(outcome.roles, RoleSet::default_user());
    }

    #[tokio::test]
    async fn signup_honours_an_explicit_role_set() {
        let roles = RoleSet::new(["ADMIN".to_owned(), "USER".to_owned()]).expect("roles");
        let outcome = service()
            .signup(Signup {
                credentials: credentials("root", "secret"),
                roles: Some(roles.clone()),
            })
            .await
            .expect("signup succeeds");
        assert_eq!(outcome.roles, roles);
    }

    #[tokio::test]
    async fn signup_with_a_taken_username_conflicts() {
        let service = service();
        service
            .signup(signup("alice", "secret"))
            .await
            .expect("first signup");

        let error = service
            .signup(signup("alice", "other"))
            .await
            .expect_err("duplicate username");
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(error.message(), "Username already exists: alice");
    }

    #[tokio::test]
    async fn login_round_trips_a_registered_account() {
        let service = service();
        service
            .signup(signup("alice", "secret"))
            .await
            .expect("signup");

        let outcome = service
            .login(credentials("alice", "secret"))
            .await
            .expect("login succeeds");
        assert_eq!(outcome.token, "token-for-alice");
        assert_eq!(outcome.roles, RoleSet::default_user());
    }

    #[tokio::test]
    async fn a_wrong_password_and_an_unknown_user_fail_identically() {
        let service = service();
        service
            .signup(signup("alice", "secret"))
            .await
            .expect("signup");

        let wrong_password = service
            .login(credentials("alice", "nope"))
            .await
            .expect_err("wrong password");
        let unknown_user = service
            .login(credentials("mallory", "secret"))
            .await
            .expect_err("unknown user");

        for error in [wrong_password, unknown_user] {
            assert_eq!(error.code(), ErrorCode::Unauthorized);
            assert_eq!(error.message(), "Invalid credentials");
        }
    }

    #[tokio::test]
    async fn store_failures_are_wrapped_as_operation_failed() {
        let service = service_with(StubUserRepository::failing(
            UserPersistenceError::connection("refused"),
        ));
        let error = service
            .login(credentials("alice", "secret"))
            .await
            .expect_err("store failure");
        assert_eq!(error.code(), ErrorCode::OperationFailed);
        assert_eq!(error.message(), "Failed to authenticate user");
    }
}
