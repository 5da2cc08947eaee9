use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "Option<String>")]
pub enum SortKey {
    #[default]
    Relevance,
    Date,
    SalaryHigh,
    SalaryLow,
    Match,
    Company,
}

impl SortKey {
    /// Unrecognized keys fall back to relevance ordering.
    pub fn parse(key: &str) -> SortKey {
        match key.trim().to_lowercase().as_str() {
            "date" => SortKey::Date,
            "salary-high" => SortKey::SalaryHigh,
            "salary-low" => SortKey::SalaryLow,
            "match" => SortKey::Match,
            "company" => SortKey::Company,
            _ => SortKey::Relevance,
        }
    }

    fn compare(&self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortKey::Relevance | SortKey::Match => b.match_percentage.cmp(&a.match_percentage),
            SortKey::Date => b.posted_date.cmp(&a.posted_date),
            SortKey::SalaryHigh => {
                let high = |r: &Record| r.compensation_range.max.unwrap_or(0);
                high(b).cmp(&high(a))
            }
            SortKey::SalaryLow => {
                let low = |r: &Record| r.compensation_range.min.unwrap_or(0);
                low(a).cmp(&low(b))
            }
            SortKey::Company => {
                let (a, b) = (&a.organization.name, &b.organization.name);
                a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
            }
        }
    }
}

impl From<Option<String>> for SortKey {
    fn from(key: Option<String>) -> Self {
        key.as_deref().map(SortKey::parse).unwrap_or_default()
    }
}

/// Returns `records` ordered by `key`. Stable: ties keep their input order.
pub fn sort(records: &[Record], key: SortKey) -> Vec<Record> {
    let mut ordered = records.to_vec();
    ordered.sort_by(|a, b| key.compare(a, b));
    ordered
}
