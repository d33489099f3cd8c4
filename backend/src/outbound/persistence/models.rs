//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. Conversion back into domain types revalidates the stored fields
//! so a corrupted row surfaces as a query error instead of a panic.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{legal_cases, users};
use crate::domain::{
    Case, CaseData, CaseDescription, CaseNumber, CaseStatus, CaseTitle, RoleSet, User, Username,
};

/// Row struct for reading from the legal_cases table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = legal_cases)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CaseRow {
    pub id: i64,
    pub case_number: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub created_date: DateTime<Utc>,
}

/// Insertable struct for creating new case records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = legal_cases)]
pub(crate) struct NewCaseRow<'a> {
    pub case_number: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: String,
    pub created_date: DateTime<Utc>,
}

impl<'a> NewCaseRow<'a> {
    pub fn from_data(data: &'a CaseData, created_date: DateTime<Utc>) -> Self {
        Self {
            case_number: data.number.as_str(),
            title: data.title.as_str(),
            description: data.description.as_ref().map(CaseDescription::as_str),
            status: data.status.to_string(),
            created_date,
        }
    }
}

/// Changeset for full-replace updates; `created_date` is never touched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = legal_cases)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CaseChangeset<'a> {
    pub case_number: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: String,
}

impl<'a> CaseChangeset<'a> {
    pub fn from_data(data: &'a CaseData) -> Self {
        Self {
            case_number: data.number.as_str(),
            title: data.title.as_str(),
            description: data.description.as_ref().map(CaseDescription::as_str),
            status: data.status.to_string(),
        }
    }
}

pub(crate) fn row_to_case(row: CaseRow) -> Result<Case, String> {
    let number = CaseNumber::new(row.case_number).map_err(|error| error.to_string())?;
    let title = CaseTitle::new(row.title).map_err(|error| error.to_string())?;
    let description = row
        .description
        .map(CaseDescription::new)
        .transpose()
        .map_err(|error| error.to_string())?;
    let status: CaseStatus = row.status.parse()?;
    Ok(Case::new(
        row.id,
        number,
        title,
        description,
        status,
        row.created_date,
    ))
}

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub roles: Vec<String>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub roles: Vec<String>,
}

pub(crate) fn row_to_user(row: UserRow) -> Result<User, String> {
    let username = Username::new(row.username).map_err(|error| error.to_string())?;
    let roles = RoleSet::new(row.roles).map_err(|error| error.to_string())?;
    Ok(User::new(row.id, username, row.password_hash, roles))
}
