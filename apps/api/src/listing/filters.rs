//! Structured filter set.
//!
//! The UI sends filters as a loose key/value bag: numbers arrive as strings,
//! cleared inputs arrive as `""` or `null`. Deserialization normalizes all of
//! that into explicit optional fields so the predicates never see junk.
//! Anything unparseable is treated as "no constraint"; unknown keys are ignored.

use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub salary_min: Option<i64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub salary_max: Option<i64>,
    #[serde(default, deserialize_with = "non_empty_text")]
    pub job_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub remote: Option<bool>,
    #[serde(default, deserialize_with = "non_empty_text")]
    pub skills: Option<String>,
    #[serde(default, deserialize_with = "lenient_bucket")]
    pub experience: Option<ExperienceLevel>,
    #[serde(default, deserialize_with = "lenient_bucket")]
    pub company_size: Option<CompanySize>,
    #[serde(default, deserialize_with = "non_empty_text")]
    pub industry: Option<String>,
    #[serde(default, deserialize_with = "lenient_bucket")]
    pub posted_date: Option<PostedWithin>,
    #[serde(default, deserialize_with = "benefit_list")]
    pub benefits: Vec<String>,
}

impl FilterSet {
    /// Number of constraints that will actually narrow a listing.
    pub fn active_count(&self) -> usize {
        [
            self.salary_min.is_some(),
            self.salary_max.is_some(),
            self.job_type.is_some(),
            self.remote == Some(true),
            self.skills.is_some(),
            self.experience.is_some(),
            self.company_size.is_some(),
            self.industry.is_some(),
            self.posted_date.is_some_and(|p| p.window().is_some()),
            !self.benefits.is_empty(),
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Buckets
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "0-1")]
    Entry,
    #[serde(rename = "2-4")]
    Mid,
    #[serde(rename = "5-7")]
    Senior,
    #[serde(rename = "8+")]
    Expert,
}

impl ExperienceLevel {
    pub fn contains(&self, years: u32) -> bool {
        match self {
            ExperienceLevel::Entry => years <= 1,
            ExperienceLevel::Mid => (2..=4).contains(&years),
            ExperienceLevel::Senior => (5..=7).contains(&years),
            ExperienceLevel::Expert => years >= 8,
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0-1" => Ok(ExperienceLevel::Entry),
            "2-4" => Ok(ExperienceLevel::Mid),
            "5-7" => Ok(ExperienceLevel::Senior),
            "8+" => Ok(ExperienceLevel::Expert),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanySize {
    Startup,
    Small,
    Medium,
    Large,
}

impl CompanySize {
    /// Buckets a headcount label by its upper bound.
    /// "10-50 employees" → Startup, "1000+ employees" → Large.
    pub fn classify(label: &str) -> Option<CompanySize> {
        let upper = headcount_upper_bound(label)?;
        Some(match upper {
            0..=50 => CompanySize::Startup,
            51..=200 => CompanySize::Small,
            201..=1000 => CompanySize::Medium,
            _ => CompanySize::Large,
        })
    }
}

impl FromStr for CompanySize {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "startup" => Ok(CompanySize::Startup),
            "small" => Ok(CompanySize::Small),
            "medium" => Ok(CompanySize::Medium),
            "large" => Ok(CompanySize::Large),
            _ => Err(()),
        }
    }
}

/// Last number in the label; an open-ended "N+" counts as N + 1.
fn headcount_upper_bound(label: &str) -> Option<u64> {
    let mut last: Option<(u64, usize)> = None;
    let mut digits = String::new();
    for (i, c) in label.char_indices() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if c == ',' && !digits.is_empty() {
            continue;
        } else if !digits.is_empty() {
            if let Ok(n) = digits.parse() {
                last = Some((n, i));
            }
            digits.clear();
        }
    }
    if let Ok(n) = digits.parse() {
        last = Some((n, label.len()));
    }

    let (n, end) = last?;
    if label[end..].starts_with('+') {
        Some(n.saturating_add(1))
    } else {
        Some(n)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostedWithin {
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "any")]
    Any,
}

impl PostedWithin {
    pub fn window(&self) -> Option<Duration> {
        match self {
            PostedWithin::Day => Some(Duration::hours(24)),
            PostedWithin::Week => Some(Duration::days(7)),
            PostedWithin::Month => Some(Duration::days(30)),
            PostedWithin::Any => None,
        }
    }
}

impl FromStr for PostedWithin {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "24h" => Ok(PostedWithin::Day),
            "7d" => Ok(PostedWithin::Week),
            "30d" => Ok(PostedWithin::Month),
            "any" => Ok(PostedWithin::Any),
            _ => Err(()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient deserializers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
#[allow(dead_code)]
enum Loose {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

fn lenient_amount<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let amount = match Option::<Loose>::deserialize(d)? {
        Some(Loose::Int(n)) => Some(n),
        Some(Loose::Float(f)) if f.is_finite() => Some(f.trunc() as i64),
        Some(Loose::Text(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    };
    Ok(amount.filter(|n| *n >= 0))
}

fn lenient_flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(match Option::<Loose>::deserialize(d)? {
        Some(Loose::Bool(b)) => Some(b),
        Some(Loose::Text(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        },
        Some(Loose::Int(n)) => Some(n != 0),
        _ => None,
    })
}

fn non_empty_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Loose>::deserialize(d)? {
        Some(Loose::Text(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        _ => None,
    })
}

fn lenient_bucket<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    Ok(match Option::<Loose>::deserialize(d)? {
        Some(Loose::Text(s)) => s.trim().parse::<T>().ok(),
        _ => None,
    })
}

fn benefit_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let raw = Option::<Vec<Loose>>::deserialize(d)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|item| match item {
            Loose::Text(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            _ => None,
        })
        .collect())
}
