//! Record sources: where a session's collections come from.
//!
//! The listing engine does not care: anything that yields records of the
//! documented shape will do. Default is the mock data compiled into the
//! binary; `file` and `http` cover exported datasets and an upstream feed.
//!
//! `AppState` holds an `Arc<dyn RecordSource>` so `/reload` can re-read it.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::SourceSettings;
use crate::models::Record;
use crate::store::{ListingKind, ListingStore};

const EMBEDDED_JOBS: &str = include_str!("../../seed/jobs.json");
const EMBEDDED_CANDIDATES: &str = include_str!("../../seed/candidates.json");

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed {kind} records: {source}")]
    Parse {
        kind: ListingKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate id {id} in {kind}")]
    DuplicateId { kind: ListingKind, id: String },

    #[error("record {id} in {kind} has matchPercentage {value}, expected 0-100")]
    MatchOutOfRange { kind: ListingKind, id: String, value: u8 },
}

#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn load(&self, kind: ListingKind) -> Result<Vec<Record>, SourceError>;

    /// Short label for logs.
    fn name(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// Implementations
// ────────────────────────────────────────────────────────────────────────────

/// Mock data shipped with the binary.
pub struct EmbeddedSource;

#[async_trait]
impl RecordSource for EmbeddedSource {
    async fn load(&self, kind: ListingKind) -> Result<Vec<Record>, SourceError> {
        let raw = match kind {
            ListingKind::Jobs => EMBEDDED_JOBS,
            ListingKind::Candidates => EMBEDDED_CANDIDATES,
        };
        parse_records(kind, raw)
    }

    fn name(&self) -> &'static str {
        "embedded"
    }
}

/// JSON arrays on disk, one file per collection.
pub struct FileSource {
    pub jobs_path: PathBuf,
    pub candidates_path: PathBuf,
}

#[async_trait]
impl RecordSource for FileSource {
    async fn load(&self, kind: ListingKind) -> Result<Vec<Record>, SourceError> {
        let path = match kind {
            ListingKind::Jobs => &self.jobs_path,
            ListingKind::Candidates => &self.candidates_path,
        };
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SourceError::Io {
                path: path.clone(),
                source,
            })?;
        parse_records(kind, &raw)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

/// Upstream service returning a JSON array per collection.
pub struct HttpSource {
    client: reqwest::Client,
    jobs_url: String,
    candidates_url: String,
}

impl HttpSource {
    pub fn new(jobs_url: String, candidates_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            jobs_url,
            candidates_url,
        }
    }
}

#[async_trait]
impl RecordSource for HttpSource {
    async fn load(&self, kind: ListingKind) -> Result<Vec<Record>, SourceError> {
        let url = match kind {
            ListingKind::Jobs => &self.jobs_url,
            ListingKind::Candidates => &self.candidates_url,
        };
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_records(kind, &body)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

pub fn from_settings(settings: &SourceSettings) -> Arc<dyn RecordSource> {
    match settings {
        SourceSettings::Embedded => Arc::new(EmbeddedSource),
        SourceSettings::File {
            jobs_path,
            candidates_path,
        } => Arc::new(FileSource {
            jobs_path: jobs_path.clone(),
            candidates_path: candidates_path.clone(),
        }),
        SourceSettings::Http {
            jobs_url,
            candidates_url,
        } => Arc::new(HttpSource::new(jobs_url.clone(), candidates_url.clone())),
    }
}

/// Loads and validates both collections into a fresh store.
pub async fn load_store(source: &dyn RecordSource) -> Result<ListingStore, SourceError> {
    let jobs = source.load(ListingKind::Jobs).await?;
    let candidates = source.load(ListingKind::Candidates).await?;
    info!(
        source = source.name(),
        jobs = jobs.len(),
        candidates = candidates.len(),
        "records loaded"
    );
    Ok(ListingStore::new(jobs, candidates))
}

// ────────────────────────────────────────────────────────────────────────────
// Parsing & validation
// ────────────────────────────────────────────────────────────────────────────

fn parse_records(kind: ListingKind, raw: &str) -> Result<Vec<Record>, SourceError> {
    let records: Vec<Record> =
        serde_json::from_str(raw).map_err(|source| SourceError::Parse { kind, source })?;
    validate_records(kind, &records)?;
    Ok(records)
}

/// Enforces the collection invariants: unique ids, match percentage within 0-100.
pub fn validate_records(kind: ListingKind, records: &[Record]) -> Result<(), SourceError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(&record.id) {
            return Err(SourceError::DuplicateId {
                kind,
                id: record.id.to_string(),
            });
        }
        if record.match_percentage > 100 {
            return Err(SourceError::MatchOutOfRange {
                kind,
                id: record.id.to_string(),
                value: record.match_percentage,
            });
        }
        if record.skills.len() != record.skills.iter().collect::<HashSet<_>>().len() {
            warn!(%kind, id = %record.id, "record lists a skill more than once");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::test_support::record;
    use crate::models::RecordId;
    use std::io::Write;

    #[tokio::test]
    async fn test_embedded_seed_loads_both_collections() {
        let store = load_store(&EmbeddedSource).await.unwrap();
        assert_eq!(store.records(ListingKind::Jobs).len(), 6);
        assert_eq!(store.records(ListingKind::Candidates).len(), 5);
        assert_eq!(store.version(), 0);
    }

    #[tokio::test]
    async fn test_file_source_reads_json_arrays() {
        let mut jobs = tempfile::NamedTempFile::new().unwrap();
        write!(jobs, "{}", serde_json::to_string(&vec![record(10, "Rust Engineer")]).unwrap()).unwrap();
        let mut candidates = tempfile::NamedTempFile::new().unwrap();
        write!(candidates, "[]").unwrap();

        let source = FileSource {
            jobs_path: jobs.path().to_path_buf(),
            candidates_path: candidates.path().to_path_buf(),
        };
        let store = load_store(&source).await.unwrap();
        assert_eq!(store.records(ListingKind::Jobs)[0].id, RecordId::Int(10));
        assert!(store.records(ListingKind::Candidates).is_empty());
    }

    #[tokio::test]
    async fn test_file_source_missing_file_is_io_error() {
        let source = FileSource {
            jobs_path: PathBuf::from("/nonexistent/jobs.json"),
            candidates_path: PathBuf::from("/nonexistent/candidates.json"),
        };
        let err = source.load(ListingKind::Jobs).await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = parse_records(ListingKind::Jobs, "{ not json").unwrap_err();
        assert!(matches!(err, SourceError::Parse { kind: ListingKind::Jobs, .. }));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let records = vec![record(1, "A"), record(1, "B")];
        let err = validate_records(ListingKind::Jobs, &records).unwrap_err();
        assert!(matches!(err, SourceError::DuplicateId { ref id, .. } if id == "1"));
    }

    #[test]
    fn test_int_and_text_ids_are_distinct() {
        let mut text = record(1, "B");
        text.id = RecordId::from("1");
        assert!(validate_records(ListingKind::Jobs, &[record(1, "A"), text]).is_ok());
    }

    #[test]
    fn test_match_percentage_over_100_rejected() {
        let mut bad = record(3, "Overmatched");
        bad.match_percentage = 140;
        let err = validate_records(ListingKind::Candidates, &[bad]).unwrap_err();
        assert!(matches!(err, SourceError::MatchOutOfRange { value: 140, .. }));
    }
}
