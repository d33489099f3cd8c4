//! Case aggregate: status enumeration, validated field newtypes, and the
//! persisted entity.
//!
//! Field rules mirror the request contract: they are applied in a fixed
//! order with the first failure winning, before any store access happens.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Closed set of workflow states a case can be in.
///
/// No transition graph is enforced: any status may follow any other on a
/// full-replace update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStatus {
    New,
    InProgress,
    OnHold,
    Resolved,
    Closed,
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::New => "NEW",
            Self::InProgress => "IN_PROGRESS",
            Self::OnHold => "ON_HOLD",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for CaseStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "NEW" => Ok(Self::New),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "ON_HOLD" => Ok(Self::OnHold),
            "RESOLVED" => Ok(Self::Resolved),
            "CLOSED" => Ok(Self::Closed),
            other => Err(format!("unknown case status: {other}")),
        }
    }
}

/// Validation errors raised while building case fields from raw input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaseValidationError {
    #[error("Case number is required")]
    CaseNumberRequired,
    #[error("Case number must be 2-20 characters long and contain only uppercase letters and numbers")]
    CaseNumberFormat,
    #[error("Case title is required")]
    TitleRequired,
    #[error("Title must be between 3 and 100 characters")]
    TitleLength,
    #[error("Case status is required")]
    StatusRequired,
    #[error("Description cannot exceed 500 characters")]
    DescriptionTooLong,
}

/// Externally visible unique business key for a case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaseNumber(String);

static CASE_NUMBER_RE: OnceLock<Regex> = OnceLock::new();

fn case_number_regex() -> &'static Regex {
    CASE_NUMBER_RE.get_or_init(|| {
        let pattern = "^[A-Z0-9]{2,20}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("case number regex failed to compile: {error}"))
    })
}

impl CaseNumber {
    /// Validate and construct a [`CaseNumber`].
    pub fn new(number: impl Into<String>) -> Result<Self, CaseValidationError> {
        let number = number.into();
        if number.trim().is_empty() {
            return Err(CaseValidationError::CaseNumberRequired);
        }
        if !case_number_regex().is_match(&number) {
            return Err(CaseValidationError::CaseNumberFormat);
        }
        Ok(Self(number))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CaseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum allowed title length in characters.
pub const TITLE_MIN: usize = 3;
/// Maximum allowed title length in characters.
pub const TITLE_MAX: usize = 100;
/// Maximum allowed description length in characters.
pub const DESCRIPTION_MAX: usize = 500;

/// Bounded, non-blank case title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseTitle(String);

impl CaseTitle {
    /// Validate and construct a [`CaseTitle`].
    pub fn new(title: impl Into<String>) -> Result<Self, CaseValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CaseValidationError::TitleRequired);
        }
        let length = title.chars().count();
        if !(TITLE_MIN..=TITLE_MAX).contains(&length) {
            return Err(CaseValidationError::TitleLength);
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Optional free-text description, bounded in length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseDescription(String);

impl CaseDescription {
    /// Validate and construct a [`CaseDescription`].
    pub fn new(description: impl Into<String>) -> Result<Self, CaseValidationError> {
        let description = description.into();
        if description.chars().count() > DESCRIPTION_MAX {
            return Err(CaseValidationError::DescriptionTooLong);
        }
        Ok(Self(description))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Validated create/update payload for a case.
///
/// Construction applies the contract rules in order, first failure wins:
/// case number, title, status presence, then description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseData {
    pub number: CaseNumber,
    pub title: CaseTitle,
    pub description: Option<CaseDescription>,
    pub status: CaseStatus,
}

impl CaseData {
    /// Validate raw request fields into a [`CaseData`].
    ///
    /// `status` is optional at this point so a missing status surfaces as a
    /// semantic validation failure rather than a deserialisation error.
    pub fn new(
        number: &str,
        title: &str,
        description: Option<&str>,
        status: Option<CaseStatus>,
    ) -> Result<Self, CaseValidationError> {
        let number = CaseNumber::new(number)?;
        let title = CaseTitle::new(title)?;
        let status = status.ok_or(CaseValidationError::StatusRequired)?;
        let description = description.map(CaseDescription::new).transpose()?;
        Ok(Self {
            number,
            title,
            description,
            status,
        })
    }
}

/// Persisted legal case.
///
/// ## Invariants
/// - `number` is globally unique among all cases.
/// - `created_at` is stamped once at creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    id: i64,
    number: CaseNumber,
    title: CaseTitle,
    description: Option<CaseDescription>,
    status: CaseStatus,
    created_at: DateTime<Utc>,
}

impl Case {
    /// Assemble a case from validated components.
    pub fn new(
        id: i64,
        number: CaseNumber,
        title: CaseTitle,
        description: Option<CaseDescription>,
        status: CaseStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            number,
            title,
            description,
            status,
            created_at,
        }
    }

    /// Opaque store-assigned identifier.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Unique business key.
    pub fn number(&self) -> &CaseNumber {
        &self.number
    }

    pub fn title(&self) -> &CaseTitle {
        &self.title
    }

    pub fn description(&self) -> Option<&CaseDescription> {
        self.description.as_ref()
    }

    pub fn status(&self) -> CaseStatus {
        self.status
    }

    /// Creation timestamp, stamped server-side and immutable.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
