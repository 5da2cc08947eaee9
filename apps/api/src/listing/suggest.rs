use crate::models::{ListingContext, Role};

const MAX_SUGGESTIONS: usize = 5;

const JOBSEEKER_SUGGESTIONS: &[&str] = &[
    "React Developer Jobs",
    "Frontend Engineer Positions",
    "JavaScript Courses",
    "Career Development",
    "Resume Building",
    "Interview Preparation",
];

const RECRUITER_SUGGESTIONS: &[&str] = &[
    "Senior Developers",
    "Frontend Candidates",
    "JavaScript Experts",
    "Remote Workers",
    "Full-time Positions",
    "Contract Roles",
];

const ADMIN_SUGGESTIONS: &[&str] = &[
    "User Management",
    "System Analytics",
    "Platform Health",
    "User Reports",
    "System Logs",
    "Performance Metrics",
];

fn suggestions_for(role: Role) -> &'static [&'static str] {
    match role {
        Role::Jobseeker => JOBSEEKER_SUGGESTIONS,
        Role::Recruiter => RECRUITER_SUGGESTIONS,
        Role::Admin => ADMIN_SUGGESTIONS,
    }
}

/// Type-ahead suggestions for the caller's role, at most five, in list order.
pub fn suggest(ctx: &ListingContext, query: &str) -> Vec<&'static str> {
    if query.is_empty() {
        return Vec::new();
    }
    let query = query.to_lowercase();
    suggestions_for(ctx.role)
        .iter()
        .copied()
        .filter(|s| s.to_lowercase().contains(&query))
        .take(MAX_SUGGESTIONS)
        .collect()
}
