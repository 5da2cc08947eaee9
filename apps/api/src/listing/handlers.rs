//! Axum route handlers for the Listing API.
//!
//! Each handler maps onto exactly one listing operation; the store only
//! swaps in whatever collection the operation returns.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::listing::filters::FilterSet;
use crate::listing::lifecycle::{apply_to_job, record_status, saved_jobs, toggle_saved};
use crate::listing::refine::refine;
use crate::listing::search::search;
use crate::listing::sort::{sort, SortKey};
use crate::listing::suggest::suggest;
use crate::models::{ApplicationStatus, ListingContext, Record, RecordId, Role};
use crate::source::load_store;
use crate::state::AppState;
use crate::store::ListingKind;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub filters: FilterSet,
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default, deserialize_with = "role_name")]
    pub role: Option<Role>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub kind: ListingKind,
    pub version: u64,
    pub total: usize,
    pub saved_count: usize,
    pub records: Vec<Record>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse {
    pub changed: bool,
    pub version: u64,
    pub record: Option<Record>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub role: Role,
    pub suggestions: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub version: u64,
    pub jobs: usize,
    pub candidates: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/listings/:kind
pub async fn handle_list(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<ListingResponse>, AppError> {
    let kind = parse_kind(&kind)?;
    let store = state.store.read().await;
    let all = store.records(kind);
    Ok(Json(listing_response(kind, store.version(), all, all.to_vec())))
}

/// POST /api/v1/listings/:kind/search
///
/// search → refine → sort over the current collection.
pub async fn handle_search(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<ListingResponse>, AppError> {
    let kind = parse_kind(&kind)?;
    let ctx = ListingContext::new(request.role.unwrap_or(state.config.default_role));

    let store = state.store.read().await;
    let all = store.records(kind);
    let matched = search(all, &request.query, &request.location, &request.filters);
    let refined = refine(&matched, &request.filters, &ctx);
    let ordered = sort(&refined, request.sort);
    debug!(
        %kind,
        active_filters = request.filters.active_count(),
        sort = ?request.sort,
        results = ordered.len(),
        "search served"
    );

    Ok(Json(listing_response(kind, store.version(), all, ordered)))
}

/// GET /api/v1/listings/:kind/saved
pub async fn handle_saved(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<ListingResponse>, AppError> {
    let kind = parse_kind(&kind)?;
    let store = state.store.read().await;
    let all = store.records(kind);
    Ok(Json(listing_response(kind, store.version(), all, saved_jobs(all))))
}

/// POST /api/v1/listings/:kind/:id/save
pub async fn handle_toggle_saved(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<MutationResponse>, AppError> {
    let kind = parse_kind(&kind)?;
    Ok(Json(mutate(&state, kind, &id, toggle_saved).await))
}

/// POST /api/v1/listings/:kind/:id/apply
pub async fn handle_apply(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<MutationResponse>, AppError> {
    let kind = parse_kind(&kind)?;
    let response = mutate(&state, kind, &id, apply_to_job).await;
    if response.changed {
        info!(%kind, %id, "application submitted");
    }
    Ok(Json(response))
}

/// PUT /api/v1/listings/:kind/:id/status
///
/// Recruiter-side pipeline updates, stored as given.
pub async fn handle_set_status(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<MutationResponse>, AppError> {
    let kind = parse_kind(&kind)?;
    let status: ApplicationStatus = serde_json::from_value(serde_json::Value::String(
        update.status.clone(),
    ))
    .map_err(|_| AppError::Validation(format!("unknown application status '{}'", update.status)))?;

    let response = mutate(&state, kind, &id, |records, id| record_status(records, id, status)).await;
    Ok(Json(response))
}

/// GET /api/v1/search/suggestions?q=&role=
pub async fn handle_suggestions(
    State(state): State<AppState>,
    Query(params): Query<SuggestQuery>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let role = match params.role.as_deref() {
        Some(raw) => raw.parse::<Role>().map_err(AppError::Validation)?,
        None => state.config.default_role,
    };
    let ctx = ListingContext::new(role);
    Ok(Json(SuggestionsResponse {
        role,
        suggestions: suggest(&ctx, &params.q),
    }))
}

/// POST /api/v1/reload
///
/// Re-reads both collections from the record source, discarding session state.
pub async fn handle_reload(State(state): State<AppState>) -> Result<Json<ReloadResponse>, AppError> {
    let fresh = load_store(state.source.as_ref()).await?;

    let mut store = state.store.write().await;
    store.reset(
        fresh.records(ListingKind::Jobs).to_vec(),
        fresh.records(ListingKind::Candidates).to_vec(),
    );
    info!(version = store.version(), "listings reloaded");

    Ok(Json(ReloadResponse {
        version: store.version(),
        jobs: store.records(ListingKind::Jobs).len(),
        candidates: store.records(ListingKind::Candidates).len(),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Same case-insensitive rule as the `role` query parameter.
fn role_name<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Role>, D::Error> {
    match Option::<String>::deserialize(d)? {
        Some(raw) => raw.parse::<Role>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn parse_kind(raw: &str) -> Result<ListingKind, AppError> {
    raw.parse::<ListingKind>().map_err(AppError::Validation)
}

fn listing_response(
    kind: ListingKind,
    version: u64,
    all: &[Record],
    records: Vec<Record>,
) -> ListingResponse {
    ListingResponse {
        kind,
        version,
        total: records.len(),
        saved_count: all.iter().filter(|r| r.is_saved).count(),
        records,
    }
}

async fn mutate(
    state: &AppState,
    kind: ListingKind,
    segment: &str,
    op: impl FnOnce(&[Record], &RecordId) -> Vec<Record>,
) -> MutationResponse {
    let mut store = state.store.write().await;
    let id = store.resolve(kind, segment);
    let updated = op(store.records(kind), &id);
    let changed = store.replace(kind, updated);
    MutationResponse {
        changed,
        version: store.version(),
        record: store.find(kind, &id).cloned(),
    }
}
