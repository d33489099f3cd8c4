//! Domain ports: traits at the seams between the core and its adapters.
//!
//! Driven ports ([`CaseRepository`], [`UserRepository`], [`PasswordHasher`],
//! [`TokenService`]) are implemented by outbound adapters. Driving ports
//! ([`CaseOperations`], [`AuthOperations`]) are implemented by domain
//! services and consumed by the HTTP layer, which keeps handlers testable
//! against stubs.

mod auth_operations;
mod case_operations;
mod case_repository;
mod password_hasher;
mod token_service;
mod user_repository;

pub use auth_operations::{AuthOperations, AuthOutcome, Signup};
pub use case_operations::{CaseListFilter, CaseOperations};
pub use case_repository::{CasePersistenceError, CaseRepository};
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use token_service::{TokenClaims, TokenService, TokenServiceError};
pub use user_repository::{UserPersistenceError, UserRepository};
