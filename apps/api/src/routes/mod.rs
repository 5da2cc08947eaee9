pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::listing::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Listing API
        .route("/api/v1/reload", post(handlers::handle_reload))
        .route("/api/v1/listings/:kind", get(handlers::handle_list))
        .route("/api/v1/listings/:kind/search", post(handlers::handle_search))
        .route("/api/v1/listings/:kind/saved", get(handlers::handle_saved))
        .route(
            "/api/v1/listings/:kind/:id/save",
            post(handlers::handle_toggle_saved),
        )
        .route(
            "/api/v1/listings/:kind/:id/apply",
            post(handlers::handle_apply),
        )
        .route(
            "/api/v1/listings/:kind/:id/status",
            put(handlers::handle_set_status),
        )
        // Search helpers
        .route(
            "/api/v1/search/suggestions",
            get(handlers::handle_suggestions),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::listing::test_support::record;
    use crate::models::RecordId;
    use crate::source::{load_store, EmbeddedSource};
    use crate::store::ListingStore;

    async fn app() -> Router {
        let store = load_store(&EmbeddedSource).await.unwrap();
        let config = Config::from_lookup(|_| None).unwrap();
        build_router(AppState::new(store, Arc::new(EmbeddedSource), config))
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn record_ids(body: &Value) -> Vec<i64> {
        body["records"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app().await;
        let (status, body) = call(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_search_filters_and_sorts() {
        let app = app().await;
        let (status, body) = call(
            &app,
            Method::POST,
            "/api/v1/listings/jobs/search",
            Some(json!({
                "query": "react",
                "location": "remote",
                "filters": { "salaryMin": "90", "jobType": "" },
                "sort": "salary-high"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        // remote React jobs with min >= 90: Frontend Architect (200), Senior Frontend (180), UI/UX (130)
        assert_eq!(record_ids(&body), vec![6, 1, 4]);
        assert_eq!(body["total"], 3);
        assert_eq!(body["savedCount"], 3);
        assert!(body.get("saved_count").is_none());
    }

    #[tokio::test]
    async fn test_search_with_empty_body_defaults_to_relevance() {
        let app = app().await;
        let (status, body) = call(&app, Method::POST, "/api/v1/listings/jobs/search", Some(json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(record_ids(&body), vec![1, 6, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_unknown_kind_is_rejected() {
        let app = app().await;
        let (status, body) = call(&app, Method::GET, "/api/v1/listings/employers", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_toggle_saved_round_trip() {
        let app = app().await;
        let (_, body) = call(&app, Method::POST, "/api/v1/listings/jobs/3/save", None).await;
        assert_eq!(body["changed"], true);
        assert_eq!(body["version"], 1);
        assert_eq!(body["record"]["isSaved"], true);

        let (_, saved) = call(&app, Method::GET, "/api/v1/listings/jobs/saved", None).await;
        assert_eq!(record_ids(&saved), vec![2, 3, 4, 6]);

        let (_, body) = call(&app, Method::POST, "/api/v1/listings/jobs/3/save", None).await;
        assert_eq!(body["record"]["isSaved"], false);
        assert_eq!(body["version"], 2);
    }

    #[tokio::test]
    async fn test_unknown_id_is_silent_noop() {
        let app = app().await;
        let (status, body) = call(&app, Method::POST, "/api/v1/listings/jobs/404/save", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["changed"], false);
        assert_eq!(body["version"], 0);
        assert!(body["record"].is_null());
    }

    #[tokio::test]
    async fn test_numeric_looking_text_id_is_addressable() {
        let mut listing = record(0, "Platform Engineer");
        listing.id = RecordId::from("42");
        let store = ListingStore::new(vec![listing], vec![]);
        let config = Config::from_lookup(|_| None).unwrap();
        let app = build_router(AppState::new(store, Arc::new(EmbeddedSource), config));

        let (status, body) = call(&app, Method::POST, "/api/v1/listings/jobs/42/save", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["changed"], true);
        assert_eq!(body["version"], 1);
        assert_eq!(body["record"]["id"], "42");
        assert_eq!(body["record"]["isSaved"], true);
    }

    #[tokio::test]
    async fn test_search_role_is_case_insensitive() {
        let app = app().await;
        let (status, _) = call(
            &app,
            Method::POST,
            "/api/v1/listings/candidates/search",
            Some(json!({ "role": "Recruiter" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/v1/listings/candidates/search",
            Some(json!({ "role": "owner" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_apply_twice() {
        let app = app().await;
        let (_, first) = call(&app, Method::POST, "/api/v1/listings/jobs/1/apply", None).await;
        assert_eq!(first["changed"], true);
        assert_eq!(first["record"]["applicationStatus"], "applied");

        let (_, second) = call(&app, Method::POST, "/api/v1/listings/jobs/1/apply", None).await;
        assert_eq!(second["changed"], false);
        assert_eq!(second["record"]["applicationStatus"], "applied");
    }

    #[tokio::test]
    async fn test_recruiter_status_update() {
        let app = app().await;
        let (status, body) = call(
            &app,
            Method::PUT,
            "/api/v1/listings/candidates/4/status",
            Some(json!({ "status": "offer" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["record"]["applicationStatus"], "hired");

        let (status, _) = call(
            &app,
            Method::PUT,
            "/api/v1/listings/candidates/4/status",
            Some(json!({ "status": "ghosted" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_suggestions_use_role() {
        let app = app().await;
        let (_, body) = call(&app, Method::GET, "/api/v1/search/suggestions?q=system&role=admin", None).await;
        assert_eq!(body["role"], "admin");
        assert_eq!(body["suggestions"], json!(["System Analytics", "System Logs"]));

        let (status, _) = call(&app, Method::GET, "/api/v1/search/suggestions?q=x&role=owner", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reload_discards_session_changes() {
        let app = app().await;
        call(&app, Method::POST, "/api/v1/listings/jobs/1/save", None).await;

        let (status, body) = call(&app, Method::POST, "/api/v1/reload", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["jobs"], 6);
        assert_eq!(body["version"], 2);

        let (_, saved) = call(&app, Method::GET, "/api/v1/listings/jobs/saved", None).await;
        assert_eq!(record_ids(&saved), vec![2, 4, 6]);
    }
}
