//! PostgreSQL-backed case store adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CasePersistenceError, CaseRepository};
use crate::domain::{Case, CaseData, CaseNumber, CaseStatus};

use super::diesel_error_mapping::{diesel_error_message, is_unique_violation, pool_error_message};
use super::models::{row_to_case, CaseChangeset, CaseRow, NewCaseRow};
use super::pool::{DbPool, PoolError};
use super::schema::legal_cases;

/// Diesel-backed implementation of the case store port.
#[derive(Clone)]
pub struct DieselCaseRepository {
    pool: DbPool,
}

impl DieselCaseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CasePersistenceError {
    CasePersistenceError::connection(pool_error_message(error))
}

/// Map a Diesel failure, classifying unique violations on the case number.
fn map_write_error(
    error: &diesel::result::Error,
    case_number: &CaseNumber,
    context: &str,
) -> CasePersistenceError {
    if is_unique_violation(error) {
        CasePersistenceError::duplicate(case_number.as_str())
    } else {
        CasePersistenceError::query(diesel_error_message(error, context))
    }
}

fn map_read_error(error: &diesel::result::Error, context: &str) -> CasePersistenceError {
    CasePersistenceError::query(diesel_error_message(error, context))
}

fn rows_to_cases(rows: Vec<CaseRow>) -> Result<Vec<Case>, CasePersistenceError> {
    rows.into_iter()
        .map(|row| row_to_case(row).map_err(CasePersistenceError::query))
        .collect()
}

#[async_trait]
impl CaseRepository for DieselCaseRepository {
    async fn list(&self) -> Result<Vec<Case>, CasePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CaseRow> = legal_cases::table
            .select(CaseRow::as_select())
            .order_by(legal_cases::id)
            .load(&mut conn)
            .await
            .map_err(|error| map_read_error(&error, "case list"))?;
        rows_to_cases(rows)
    }

    async fn find_by_status(&self, status: CaseStatus) -> Result<Vec<Case>, CasePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CaseRow> = legal_cases::table
            .filter(legal_cases::status.eq(status.to_string()))
            .select(CaseRow::as_select())
            .order_by(legal_cases::id)
            .load(&mut conn)
            .await
            .map_err(|error| map_read_error(&error, "case list by status"))?;
        rows_to_cases(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Case>, CasePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CaseRow> = legal_cases::table
            .find(id)
            .select(CaseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|error| map_read_error(&error, "case read"))?;
        row.map(|row| row_to_case(row).map_err(CasePersistenceError::query))
            .transpose()
    }

    async fn exists_by_number(&self, number: &CaseNumber) -> Result<bool, CasePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(exists(
            legal_cases::table.filter(legal_cases::case_number.eq(number.as_str())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(|error| map_read_error(&error, "case number check"))
    }

    async fn insert(
        &self,
        data: &CaseData,
        created_at: DateTime<Utc>,
    ) -> Result<Case, CasePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: CaseRow = diesel::insert_into(legal_cases::table)
            .values(NewCaseRow::from_data(data, created_at))
            .returning(CaseRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| map_write_error(&error, &data.number, "case insert"))?;
        row_to_case(row).map_err(CasePersistenceError::query)
    }

    async fn update(&self, id: i64, data: &CaseData) -> Result<Option<Case>, CasePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CaseRow> = diesel::update(legal_cases::table.find(id))
            .set(CaseChangeset::from_data(data))
            .returning(CaseRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|error| map_write_error(&error, &data.number, "case update"))?;
        row.map(|row| row_to_case(row).map_err(CasePersistenceError::query))
            .transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool, CasePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(legal_cases::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(|error| map_read_error(&error, "case delete"))?;
        Ok(deleted > 0)
    }
}
