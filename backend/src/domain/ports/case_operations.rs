//! Driving port for case management, consumed by the HTTP adapter.

use async_trait::async_trait;

use crate::domain::{Case, CaseData, CaseStatus, DomainError};

/// Optional constraints applied when listing cases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaseListFilter {
    pub status: Option<CaseStatus>,
}

/// Case lifecycle operations exposed to inbound adapters.
#[async_trait]
pub trait CaseOperations: Send + Sync {
    /// List cases, optionally constrained to one status.
    async fn list(&self, filter: CaseListFilter) -> Result<Vec<Case>, DomainError>;

    /// Fetch one case by identifier.
    async fn get(&self, id: i64) -> Result<Case, DomainError>;

    /// Create a case from a validated payload.
    async fn create(&self, data: CaseData) -> Result<Case, DomainError>;

    /// Full-replace update of an existing case.
    async fn update(&self, id: i64, data: CaseData) -> Result<Case, DomainError>;

    /// Hard-delete a case by identifier.
    async fn delete(&self, id: i64) -> Result<(), DomainError>;
}
