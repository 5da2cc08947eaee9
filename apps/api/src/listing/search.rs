use tracing::debug;

use crate::listing::filters::FilterSet;
use crate::models::Record;

/// Narrows `records` to those matching the text query, the location and the
/// core filters. Input order is preserved; the input is left untouched.
pub fn search(records: &[Record], query: &str, location: &str, filters: &FilterSet) -> Vec<Record> {
    let query = query.to_lowercase();
    let location = location.to_lowercase();

    let retained: Vec<Record> = records
        .iter()
        .filter(|r| matches_text(r, &query))
        .filter(|r| matches_location(r, &location))
        .filter(|r| matches_filters(r, filters))
        .cloned()
        .collect();

    debug!(total = records.len(), retained = retained.len(), "search applied");
    retained
}

/// `query` must already be lowercased. Empty matches everything.
fn matches_text(record: &Record, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    record.title.to_lowercase().contains(query)
        || record.organization.name.to_lowercase().contains(query)
        || record.skills.iter().any(|s| s.to_lowercase().contains(query))
}

/// `location` must already be lowercased. "remote" also matches remote records.
fn matches_location(record: &Record, location: &str) -> bool {
    if location.is_empty() {
        return true;
    }
    record.location.to_lowercase().contains(location) || (location == "remote" && record.remote)
}

fn matches_filters(record: &Record, filters: &FilterSet) -> bool {
    let pay = &record.compensation_range;

    // An undisclosed floor fails a set minimum; an open-ended ceiling passes a set maximum.
    if let Some(floor) = filters.salary_min {
        if !pay.min.is_some_and(|min| min >= floor) {
            return false;
        }
    }
    if let Some(ceiling) = filters.salary_max {
        if !pay.max.map_or(true, |max| max <= ceiling) {
            return false;
        }
    }

    if let Some(job_type) = &filters.job_type {
        if !record.employment_type.eq_ignore_ascii_case(job_type) {
            return false;
        }
    }

    if filters.remote == Some(true) && !record.remote {
        return false;
    }

    if let Some(skill) = &filters.skills {
        let skill = skill.to_lowercase();
        if !record.skills.iter().any(|s| s.to_lowercase().contains(&skill)) {
            return false;
        }
    }

    true
}
