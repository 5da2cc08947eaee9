//! The only state the listing owns: the saved flag and the application
//! status. Every operation returns a fresh collection and leaves the input
//! alone. Unknown ids are absorbed as no-ops.

use tracing::{debug, warn};

use crate::models::{ApplicationStatus, Record, RecordId};

/// Flips `is_saved` on the record with `id`.
pub fn toggle_saved(records: &[Record], id: &RecordId) -> Vec<Record> {
    if !contains(records, id) {
        debug!(%id, "toggle_saved: unknown id, ignoring");
    }
    update(records, id, |r| r.is_saved = !r.is_saved)
}

/// User-initiated apply. Only moves `not-applied` to `applied`; any other
/// status is left as it is.
pub fn apply_to_job(records: &[Record], id: &RecordId) -> Vec<Record> {
    update(records, id, |r| {
        if r.application_status == ApplicationStatus::NotApplied {
            r.application_status = ApplicationStatus::Applied;
        } else {
            debug!(%id, status = %r.application_status, "apply_to_job: already past not-applied");
        }
    })
}

/// Stores a status reported by the recruiter side verbatim. Transitions
/// outside the documented pipeline are logged but still recorded.
pub fn record_status(records: &[Record], id: &RecordId, status: ApplicationStatus) -> Vec<Record> {
    update(records, id, |r| {
        if r.application_status.is_terminal() && r.application_status != status {
            warn!(%id, from = %r.application_status, to = %status, "reopening a closed application");
        } else if !r.application_status.can_transition_to(status) {
            warn!(
                %id,
                from = %r.application_status,
                to = %status,
                "status change outside the documented pipeline"
            );
        }
        r.application_status = status;
    })
}

/// The saved subset, in collection order.
pub fn saved_jobs(records: &[Record]) -> Vec<Record> {
    records.iter().filter(|r| r.is_saved).cloned().collect()
}

fn contains(records: &[Record], id: &RecordId) -> bool {
    records.iter().any(|r| &r.id == id)
}

fn update(records: &[Record], id: &RecordId, change: impl Fn(&mut Record)) -> Vec<Record> {
    records
        .iter()
        .map(|r| {
            let mut r = r.clone();
            if &r.id == id {
                change(&mut r);
            }
            r
        })
        .collect()
}
