use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Jobseeker,
    Recruiter,
    Admin,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "jobseeker" => Ok(Role::Jobseeker),
            "recruiter" => Ok(Role::Recruiter),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Caller-supplied context for operations that depend on who is asking
/// or on the current time. Built per request, never stored globally.
#[derive(Debug, Clone, Copy)]
pub struct ListingContext {
    pub role: Role,
    pub now: DateTime<Utc>,
}

impl ListingContext {
    pub fn new(role: Role) -> Self {
        Self::at(role, Utc::now())
    }

    pub fn at(role: Role, now: DateTime<Utc>) -> Self {
        Self { role, now }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parses_case_insensitively() {
        assert_eq!("Recruiter".parse::<Role>().unwrap(), Role::Recruiter);
        assert_eq!(" admin ".parse::<Role>().unwrap(), Role::Admin);
        assert!("owner".parse::<Role>().is_err());
    }
}
