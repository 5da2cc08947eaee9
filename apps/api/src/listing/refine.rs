//! Second filter stage for the sidebar constraints the core search leaves
//! alone: posting age, company size, industry, benefits and experience.
//! A record missing the attribute a set constraint looks at is dropped.

use tracing::debug;

use crate::listing::filters::{CompanySize, FilterSet};
use crate::models::{ListingContext, Record};

pub fn refine(records: &[Record], filters: &FilterSet, ctx: &ListingContext) -> Vec<Record> {
    let retained: Vec<Record> = records
        .iter()
        .filter(|r| matches_refinements(r, filters, ctx))
        .cloned()
        .collect();

    debug!(total = records.len(), retained = retained.len(), "refine applied");
    retained
}

fn matches_refinements(record: &Record, filters: &FilterSet, ctx: &ListingContext) -> bool {
    if let Some(window) = filters.posted_date.and_then(|p| p.window()) {
        if ctx.now - record.posted_date > window {
            return false;
        }
    }

    if let Some(wanted) = filters.company_size {
        let actual = record.organization.size.as_deref().and_then(CompanySize::classify);
        if actual != Some(wanted) {
            return false;
        }
    }

    if let Some(industry) = &filters.industry {
        let industry = industry.to_lowercase();
        let matched = record
            .organization
            .industry
            .as_deref()
            .is_some_and(|i| i.to_lowercase().contains(&industry));
        if !matched {
            return false;
        }
    }

    for wanted in &filters.benefits {
        let wanted = wanted.to_lowercase();
        if !record.benefits.iter().any(|b| b.to_lowercase().contains(&wanted)) {
            return false;
        }
    }

    if let Some(level) = filters.experience {
        if !record.experience_years.is_some_and(|years| level.contains(years)) {
            return false;
        }
    }

    true
}
