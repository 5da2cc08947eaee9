use chrono::{DateTime, Utc};

use crate::models::record::{CompensationRange, Organization};
use crate::models::{ApplicationStatus, Record, RecordId};

pub fn ts(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
}

pub fn record(id: i64, title: &str) -> Record {
    Record {
        id: RecordId::Int(id),
        title: title.to_string(),
        organization: Organization {
            name: format!("Org {id}"),
            location: String::new(),
            size: None,
            industry: None,
        },
        location: String::new(),
        employment_type: "Full-time".to_string(),
        remote: false,
        compensation_range: CompensationRange::default(),
        match_percentage: 50,
        skills: vec![],
        application_status: ApplicationStatus::NotApplied,
        posted_date: ts("2025-01-01T00:00:00Z"),
        is_saved: false,
        description: String::new(),
        benefits: vec![],
        experience_years: None,
    }
}

/// The two-record collection used by the documented example scenarios.
pub fn scenario_records() -> Vec<Record> {
    let mut senior = record(1, "Senior Frontend Developer");
    senior.organization.name = "TechCorp Solutions".to_string();
    senior.location = "San Francisco, CA".to_string();
    senior.remote = true;
    senior.compensation_range = CompensationRange { min: Some(120), max: Some(180) };
    senior.match_percentage = 95;
    senior.skills = vec!["React".to_string(), "TypeScript".to_string()];

    let mut react = record(2, "React Developer");
    react.organization.name = "StartupXYZ".to_string();
    react.location = "New York, NY".to_string();
    react.remote = true;
    react.compensation_range = CompensationRange { min: Some(80), max: Some(120) };
    react.match_percentage = 82;
    react.skills = vec!["React".to_string()];

    vec![senior, react]
}

pub fn ids(records: &[Record]) -> Vec<RecordId> {
    records.iter().map(|r| r.id.clone()).collect()
}
