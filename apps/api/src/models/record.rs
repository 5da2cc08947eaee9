use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identifier of a listing record. Seed data uses integers, but
/// string ids from an upstream feed are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    /// Interprets a URL path segment: integers first, otherwise the raw string.
    pub fn from_path(segment: &str) -> Self {
        match segment.parse::<i64>() {
            Ok(n) => RecordId::Int(n),
            Err(_) => RecordId::Text(segment.to_string()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

/// Pipeline state of an application.
///
/// ```text
/// not-applied -> applied -> reviewing -> interview -> hired
///                                    \-> rejected  \-> rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplicationStatus {
    #[default]
    NotApplied,
    Applied,
    Reviewing,
    Interview,
    Rejected,
    #[serde(alias = "offer")]
    Hired,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::NotApplied => "not-applied",
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Reviewing => "reviewing",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Hired => "hired",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Rejected | ApplicationStatus::Hired)
    }

    /// Whether `next` is one of the documented pipeline transitions.
    /// Re-asserting the current status counts as allowed.
    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        use ApplicationStatus::*;
        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (NotApplied, Applied)
                | (Applied, Reviewing)
                | (Reviewing, Interview)
                | (Reviewing, Rejected)
                | (Interview, Rejected)
                | (Interview, Hired)
        )
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub name: String,
    #[serde(default)]
    pub location: String,
    /// Free-form headcount, e.g. "500-1000 employees" or "1000+ employees".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

/// Compensation in thousands per year. Either bound may be undisclosed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompensationRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

/// A job posting or a candidate; both views share this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    pub organization: Organization,
    pub location: String,
    pub employment_type: String,
    #[serde(default)]
    pub remote: bool,
    #[serde(default)]
    pub compensation_range: CompensationRange,
    /// Precomputed 0-100 relevance. Supplied by the record source, never derived here.
    pub match_percentage: u8,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub application_status: ApplicationStatus,
    pub posted_date: DateTime<Utc>,
    #[serde(default)]
    pub is_saved: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u32>,
}
