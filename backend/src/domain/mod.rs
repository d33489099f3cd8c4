//! Core domain: entities, validation, ports, and services.
//!
//! Nothing here depends on HTTP or the database. Adapters plug in through
//! the traits in [`ports`].

mod auth_service;
mod case;
mod case_service;
mod error;
pub mod ports;
mod user;

pub use auth_service::AuthenticationService;
pub use case::{
    Case, CaseData, CaseDescription, CaseNumber, CaseStatus, CaseTitle, CaseValidationError,
};
pub use case_service::CaseManagementService;
pub use error::{DomainError, ErrorCode};
pub use user::{Credentials, NewUser, RoleSet, User, UserValidationError, Username};
