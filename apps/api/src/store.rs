use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{Record, RecordId};

/// Which collection a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Jobs,
    Candidates,
}

impl ListingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingKind::Jobs => "jobs",
            ListingKind::Candidates => "candidates",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jobs" => Ok(ListingKind::Jobs),
            "candidates" => Ok(ListingKind::Candidates),
            other => Err(format!("unknown listing kind '{other}'")),
        }
    }
}

/// In-memory holder for the session's collections.
///
/// Collections are only ever swapped wholesale with the output of a listing
/// operation. `version` counts effective swaps so clients can detect stale views.
#[derive(Debug, Clone, Default)]
pub struct ListingStore {
    jobs: Vec<Record>,
    candidates: Vec<Record>,
    version: u64,
}

impl ListingStore {
    pub fn new(jobs: Vec<Record>, candidates: Vec<Record>) -> Self {
        Self {
            jobs,
            candidates,
            version: 0,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn records(&self, kind: ListingKind) -> &[Record] {
        match kind {
            ListingKind::Jobs => &self.jobs,
            ListingKind::Candidates => &self.candidates,
        }
    }

    pub fn find(&self, kind: ListingKind, id: &RecordId) -> Option<&Record> {
        self.records(kind).iter().find(|r| &r.id == id)
    }

    /// Maps a URL path segment onto an id held in `kind`. Text ids that look
    /// numeric are matched by their rendering; an unknown segment falls back
    /// to [`RecordId::from_path`].
    pub fn resolve(&self, kind: ListingKind, segment: &str) -> RecordId {
        self.records(kind)
            .iter()
            .map(|r| &r.id)
            .find(|id| id.to_string() == segment)
            .cloned()
            .unwrap_or_else(|| RecordId::from_path(segment))
    }

    /// Swaps in `updated`. Returns whether anything actually changed; the
    /// version only moves when it did.
    pub fn replace(&mut self, kind: ListingKind, updated: Vec<Record>) -> bool {
        let slot = match kind {
            ListingKind::Jobs => &mut self.jobs,
            ListingKind::Candidates => &mut self.candidates,
        };
        if *slot == updated {
            return false;
        }
        *slot = updated;
        self.version += 1;
        true
    }

    /// Replaces both collections, e.g. after a reload from the record source.
    pub fn reset(&mut self, jobs: Vec<Record>, candidates: Vec<Record>) {
        self.jobs = jobs;
        self.candidates = candidates;
        self.version += 1;
    }
}
