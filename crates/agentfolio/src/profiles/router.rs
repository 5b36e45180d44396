use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::domain::{Lead, ProfileSubmission};
use super::publication::ViewerContext;
use super::repository::{LeadSink, ProfileRepository, ProfileStoreError};
use super::service::{ProfileService, ProfileServiceError};

/// Header the upstream auth layer injects with the authenticated agent's
/// slug; the public route uses it for owner detection only.
pub const AGENT_SLUG_HEADER: &str = "x-agent-slug";

/// Router builder exposing slug checks, the terminal commit, the public
/// profile page, and lead capture.
pub fn profile_router<R, L>(service: Arc<ProfileService<R, L>>) -> Router
where
    R: ProfileRepository + 'static,
    L: LeadSink + 'static,
{
    Router::new()
        .route("/api/v1/slugs/check", post(check_slug_handler::<R, L>))
        .route("/api/v1/profiles/commit", post(commit_handler::<R, L>))
        .route("/agents/:slug", get(public_page_handler::<R, L>))
        .route("/agents/:slug/leads", post(lead_handler::<R, L>))
        .route(
            "/api/v1/profiles/:slug/capacity",
            get(capacity_handler::<R, L>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SlugCheckRequest {
    pub(crate) slug: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PublicPageQuery {
    #[serde(default)]
    pub(crate) view: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LeadRequest {
    pub(crate) name: String,
    pub(crate) phone: String,
    pub(crate) message: String,
}

pub(crate) async fn check_slug_handler<R, L>(
    State(service): State<Arc<ProfileService<R, L>>>,
    axum::Json(request): axum::Json<SlugCheckRequest>,
) -> Response
where
    R: ProfileRepository + 'static,
    L: LeadSink + 'static,
{
    match service.check_slug(&request.slug) {
        Ok(availability) => (StatusCode::OK, axum::Json(availability)).into_response(),
        Err(error) => slug_error_response(error),
    }
}

pub(crate) async fn commit_handler<R, L>(
    State(service): State<Arc<ProfileService<R, L>>>,
    axum::Json(submission): axum::Json<ProfileSubmission>,
) -> Response
where
    R: ProfileRepository + 'static,
    L: LeadSink + 'static,
{
    match service.commit(submission) {
        Ok(receipt) => (
            StatusCode::CREATED,
            axum::Json(json!({
                "success": true,
                "agent": { "slug": receipt.slug },
            })),
        )
            .into_response(),
        Err(ProfileServiceError::Validation(violation)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            axum::Json(json!({
                "success": false,
                "error": violation.to_string(),
            })),
        )
            .into_response(),
        Err(ProfileServiceError::SlugConflict { suggestion }) => (
            StatusCode::CONFLICT,
            axum::Json(json!({
                "success": false,
                "error": "slug already in use",
                "suggestion": suggestion,
            })),
        )
            .into_response(),
        Err(other) => storage_error_response(other),
    }
}

pub(crate) async fn public_page_handler<R, L>(
    State(service): State<Arc<ProfileService<R, L>>>,
    Path(slug): Path<String>,
    Query(query): Query<PublicPageQuery>,
    headers: HeaderMap,
) -> Response
where
    R: ProfileRepository + 'static,
    L: LeadSink + 'static,
{
    let viewer = viewer_from_request(&headers, &slug, query.view.as_deref());

    match service.public_page(&slug, viewer, Utc::now()) {
        Ok(page) => Html(page.html).into_response(),
        Err(ProfileServiceError::Store(ProfileStoreError::NotFound)) => {
            (StatusCode::NOT_FOUND, Html(not_found_page(&slug))).into_response()
        }
        Err(other) => storage_error_response(other),
    }
}

pub(crate) async fn lead_handler<R, L>(
    State(service): State<Arc<ProfileService<R, L>>>,
    Path(slug): Path<String>,
    axum::Json(request): axum::Json<LeadRequest>,
) -> Response
where
    R: ProfileRepository + 'static,
    L: LeadSink + 'static,
{
    let lead = Lead {
        name: request.name,
        phone: request.phone,
        message: request.message,
        received_at: Utc::now(),
    };

    match service.submit_lead(&slug, lead, Utc::now()) {
        Ok(()) => (StatusCode::ACCEPTED, axum::Json(json!({ "success": true }))).into_response(),
        Err(ProfileServiceError::ProfileGated) => (
            StatusCode::FORBIDDEN,
            axum::Json(json!({
                "success": false,
                "error": "profile is not accepting enquiries",
            })),
        )
            .into_response(),
        Err(ProfileServiceError::Validation(violation)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            axum::Json(json!({
                "success": false,
                "error": violation.to_string(),
            })),
        )
            .into_response(),
        Err(other) => storage_error_response(other),
    }
}

pub(crate) async fn capacity_handler<R, L>(
    State(service): State<Arc<ProfileService<R, L>>>,
    Path(slug): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
    L: LeadSink + 'static,
{
    match service.capacity(&slug) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(other) => storage_error_response(other),
    }
}

pub(crate) fn viewer_from_request(
    headers: &HeaderMap,
    slug: &str,
    view: Option<&str>,
) -> ViewerContext {
    let is_owner = headers
        .get(AGENT_SLUG_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|owner_slug| owner_slug == slug)
        .unwrap_or(false);
    let force_public = matches!(view, Some("public"));

    ViewerContext {
        is_owner,
        force_public,
    }
}

fn not_found_page(slug: &str) -> String {
    format!(
        "<!doctype html><html><body><h1>No agent at /{}</h1></body></html>",
        crate::templates::escape_html(slug)
    )
}

fn slug_error_response(error: crate::profiles::slug::SlugError) -> Response {
    use crate::profiles::slug::SlugError;

    match error {
        SlugError::InvalidInput { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            axum::Json(json!({ "error": error.to_string() })),
        )
            .into_response(),
        SlugError::StorageUnavailable(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({ "error": "please retry later" })),
        )
            .into_response(),
    }
}

fn storage_error_response(error: ProfileServiceError) -> Response {
    let status = match &error {
        ProfileServiceError::Store(ProfileStoreError::NotFound) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let message = match status {
        StatusCode::NOT_FOUND => error.to_string(),
        _ => "please retry later".to_string(),
    };

    (status, axum::Json(json!({ "error": message }))).into_response()
}
