//! Case lifecycle service: orchestrates validation outcomes, duplicate
//! checks, and store calls, translating store results into domain outcomes.
//!
//! Duplicate-number races between the existence check and the following
//! insert or update are not locked here; the store's uniqueness constraint
//! is the backstop and surfaces as [`CasePersistenceError::DuplicateCaseNumber`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{error, info};

use crate::domain::ports::{
    CaseListFilter, CaseOperations, CasePersistenceError, CaseRepository,
};
use crate::domain::{Case, CaseData, DomainError};

/// Domain service implementing the case driving port.
#[derive(Clone)]
pub struct CaseManagementService {
    repository: Arc<dyn CaseRepository>,
}

impl CaseManagementService {
    /// Create a new service over the given case store.
    pub fn new(repository: Arc<dyn CaseRepository>) -> Self {
        Self { repository }
    }
}

fn duplicate_number_error(case_number: &str) -> DomainError {
    DomainError::conflict(format!("Case number already exists: {case_number}"))
}

fn not_found_error(id: i64) -> DomainError {
    DomainError::not_found(format!("Case not found with id: {id}"))
}

/// Wrap an unclassified store failure, preserving duplicate-key identity.
fn map_store_error(error: CasePersistenceError, wrap_message: &str) -> DomainError {
    match error {
        CasePersistenceError::DuplicateCaseNumber { case_number } => {
            duplicate_number_error(&case_number)
        }
        CasePersistenceError::Connection { message } | CasePersistenceError::Query { message } => {
            error!(error = %message, "case store operation failed");
            DomainError::operation_failed(wrap_message)
        }
    }
}

#[async_trait]
impl CaseOperations for CaseManagementService {
    async fn list(&self, filter: CaseListFilter) -> Result<Vec<Case>, DomainError> {
        info!(status = ?filter.status, "retrieving cases");
        let cases = match filter.status {
            Some(status) => self.repository.find_by_status(status).await,
            None => self.repository.list().await,
        }
        .map_err(|err| map_store_error(err, "Failed to retrieve cases"))?;
        info!(count = cases.len(), "retrieved cases");
        Ok(cases)
    }

    async fn get(&self, id: i64) -> Result<Case, DomainError> {
        info!(id, "retrieving case");
        self.repository
            .find_by_id(id)
            .await
            .map_err(|err| map_store_error(err, "Failed to retrieve case"))?
            .ok_or_else(|| not_found_error(id))
    }

    async fn create(&self, data: CaseData) -> Result<Case, DomainError> {
        info!(case_number = %data.number, "creating case");
        let exists = self
            .repository
            .exists_by_number(&data.number)
            .await
            .map_err(|err| map_store_error(err, "Failed to create case"))?;
        if exists {
            return Err(duplicate_number_error(data.number.as_str()));
        }

        let created = self
            .repository
            .insert(&data, Utc::now())
            .await
            .map_err(|err| map_store_error(err, "Failed to create case"))?;
        info!(id = created.id(), "created case");
        Ok(created)
    }

    async fn update(&self, id: i64, data: CaseData) -> Result<Case, DomainError> {
        info!(id, "updating case");
        let existing = self
            .repository
            .find_by_id(id)
            .await
            .map_err(|err| map_store_error(err, "Failed to update case"))?
            .ok_or_else(|| not_found_error(id))?;

        // Only a *changed* number can collide with another case.
        if existing.number() != &data.number {
            let exists = self
                .repository
                .exists_by_number(&data.number)
                .await
                .map_err(|err| map_store_error(err, "Failed to update case"))?;
            if exists {
                return Err(duplicate_number_error(data.number.as_str()));
            }
        }

        let updated = self
            .repository
            .update(id, &data)
            .await
            .map_err(|err| map_store_error(err, "Failed to update case"))?
            .ok_or_else(|| not_found_error(id))?;
        info!(id, "updated case");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        info!(id, "deleting case");
        let deleted = self
            .repository
            .delete(id)
            .await
            .map_err(|err| map_store_error(err, "Failed to delete case"))?;
        if !deleted {
            return Err(not_found_error(id));
        }
        info!(id, "deleted case");
        Ok(())
    }
}
