//! Shared fixtures for HTTP handler tests: in-memory adapters wired into
//! the real domain services, plus a transparent token scheme so requests
//! can authenticate without real keys.

use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    CasePersistenceError, CaseRepository, PasswordHashError, PasswordHasher, TokenClaims,
    TokenService, TokenServiceError, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AuthenticationService, Case, CaseData, CaseManagementService, CaseNumber, CaseStatus, NewUser,
    RoleSet, User, Username,
};
use crate::inbound::http::state::HttpState;

#[derive(Default)]
pub(crate) struct InMemoryCaseRepository {
    state: Mutex<(Vec<Case>, i64)>,
}

#[async_trait]
impl CaseRepository for InMemoryCaseRepository {
    async fn list(&self) -> Result<Vec<Case>, CasePersistenceError> {
        Ok(self.state.lock().expect("state lock").0.clone())
    }

    async fn find_by_status(&self, status: CaseStatus) -> Result<Vec<Case>, CasePersistenceError> {
        Ok(self
            .state
            .lock()
            .expect("state lock")
            .0
            .iter()
            .filter(|case| case.status() == status)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Case>, CasePersistenceError> {
        Ok(self
            .state
            .lock()
            .expect("state lock")
            .0
            .iter()
            .find(|case| case.id() == id)
            .cloned())
    }

    async fn exists_by_number(&self, number: &CaseNumber) -> Result<bool, CasePersistenceError> {
        Ok(self
            .state
            .lock()
            .expect("state lock")
            .0
            .iter()
            .any(|case| case.number() == number))
    }

    async fn insert(
        &self,
        data: &CaseData,
        created_at: DateTime<Utc>,
    ) -> Result<Case, CasePersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        if state.0.iter().any(|case| case.number() == &data.number) {
            return Err(CasePersistenceError::duplicate(data.number.as_str()));
        }
        state.1 += 1;
        let case = Case::new(
            state.1,
            data.number.clone(),
            data.title.clone(),
            data.description.clone(),
            data.status,
            created_at,
        );
        state.0.push(case.clone());
        Ok(case)
    }

    async fn update(&self, id: i64, data: &CaseData) -> Result<Option<Case>, CasePersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        if state
            .0
            .iter()
            .any(|case| case.id() != id && case.number() == &data.number)
        {
            return Err(CasePersistenceError::duplicate(data.number.as_str()));
        }
        let Some(slot) = state.0.iter_mut().find(|case| case.id() == id) else {
            return Ok(None);
        };
        let replaced = Case::new(
            id,
            data.number.clone(),
            data.title.clone(),
            data.description.clone(),
            data.status,
            slot.created_at(),
        );
        *slot = replaced.clone();
        Ok(Some(replaced))
    }

    async fn delete(&self, id: i64) -> Result<bool, CasePersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        let before = state.0.len();
        state.0.retain(|case| case.id() != id);
        Ok(state.0.len() < before)
    }
}

#[derive(Default)]
pub(crate) struct InMemoryUserRepository {
    state: Mutex<(Vec<User>, i64)>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .state
            .lock()
            .expect("state lock")
            .0
            .iter()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        if state
            .0
            .iter()
            .any(|existing| existing.username() == &user.username)
        {
            return Err(UserPersistenceError::duplicate(user.username.as_str()));
        }
        state.1 += 1;
        let stored = User::new(
            state.1,
            user.username.clone(),
            user.password_hash.clone(),
            user.roles.clone(),
        );
        state.0.push(stored.clone());
        Ok(stored)
    }
}

/// Reversible stand-in hash so fixtures need no real key derivation.
pub(crate) struct PlainTextHasher;

impl PasswordHasher for PlainTextHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        Ok(hash == format!("plain:{password}"))
    }
}

/// Transparent token scheme: `username:ROLE_A+ROLE_B`.
///
/// Tokens issued at login verify in the same app instance, and tests can
/// forge tokens for arbitrary role sets without signing anything.
pub(crate) struct PlainTokenService;

pub(crate) fn token_for(username: &str, roles: &[&str]) -> String {
    format!("{username}:{}", roles.join("+"))
}

impl TokenService for PlainTokenService {
    fn issue(&self, username: &Username, roles: &RoleSet) -> Result<String, TokenServiceError> {
        let roles: Vec<&str> = roles.iter().collect();
        Ok(token_for(username.as_str(), &roles))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenServiceError> {
        let (username, roles) = token
            .split_once(':')
            .ok_or_else(|| TokenServiceError::invalid("malformed token"))?;
        let username = Username::new(username)
            .map_err(|error| TokenServiceError::invalid(error.to_string()))?;
        let roles = RoleSet::new(roles.split('+').filter(|role| !role.is_empty()))
            .map_err(|error| TokenServiceError::invalid(error.to_string()))?;
        Ok(TokenClaims { username, roles })
    }
}

/// Real domain services over in-memory adapters.
pub(crate) fn test_state() -> web::Data<HttpState> {
    let tokens = Arc::new(PlainTokenService);
    let cases = CaseManagementService::new(Arc::new(InMemoryCaseRepository::default()));
    let auth = AuthenticationService::new(
        Arc::new(InMemoryUserRepository::default()),
        Arc::new(PlainTextHasher),
        tokens.clone(),
    );
    web::Data::new(HttpState::new(Arc::new(cases), Arc::new(auth), tokens))
}
