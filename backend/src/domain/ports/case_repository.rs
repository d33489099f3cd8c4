//! Port abstraction for case persistence adapters and their errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Case, CaseData, CaseNumber, CaseStatus};

/// Persistence errors raised by case store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CasePersistenceError {
    /// Store connection could not be established.
    #[error("case store connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("case store query failed: {message}")]
    Query { message: String },

    /// The store's uniqueness constraint on the case number fired.
    ///
    /// This is the backstop for races between the service-level existence
    /// check and the subsequent insert or update.
    #[error("case number already exists: {case_number}")]
    DuplicateCaseNumber { case_number: String },
}

impl CasePersistenceError {
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

    pub fn duplicate(case_number: impl Into<String>) -> Self {
        Self::DuplicateCaseNumber {
            case_number: case_number.into(),
        }
    }
}

/// Store operations the case service depends on.
#[async_trait]
pub trait CaseRepository: Send + Sync {
    /// Fetch every case.
    async fn list(&self) -> Result<Vec<Case>, CasePersistenceError>;

    /// Fetch the cases currently in the given status.
    async fn find_by_status(&self, status: CaseStatus) -> Result<Vec<Case>, CasePersistenceError>;

    /// Fetch a case by store identifier.
    async fn find_by_id(&self, id: i64) -> Result<Option<Case>, CasePersistenceError>;

    /// Whether any case carries the given business key.
    async fn exists_by_number(&self, number: &CaseNumber) -> Result<bool, CasePersistenceError>;

    /// Persist a new case, returning it with its assigned identifier.
    async fn insert(
        &self,
        data: &CaseData,
        created_at: DateTime<Utc>,
    ) -> Result<Case, CasePersistenceError>;

    /// Overwrite the mutable fields of an existing case.
    ///
    /// Returns `None` when no record carries `id`. The creation timestamp
    /// is left untouched.
    async fn update(&self, id: i64, data: &CaseData) -> Result<Option<Case>, CasePersistenceError>;

    /// Remove a case by identifier. Returns whether a record was deleted.
    async fn delete(&self, id: i64) -> Result<bool, CasePersistenceError>;
}
