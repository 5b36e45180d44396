use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde_json::json;

use crate::profiles::repository::ProfileRepository;

use super::repository::{AdminAuditLog, ModerationQueue};
use super::service::{ModerationError, ModerationService, OverrideRequest, ReviewRequest};

/// Router builder for the admin console endpoints. Authentication happens
/// upstream; everything under `/api/v1/admin` assumes an admin caller.
pub fn moderation_router<Q, R, A>(service: Arc<ModerationService<Q, R, A>>) -> Router
where
    Q: ModerationQueue + 'static,
    R: ProfileRepository + 'static,
    A: AdminAuditLog + 'static,
{
    Router::new()
        .route(
            "/api/v1/admin/moderation/pending",
            get(pending_handler::<Q, R, A>),
        )
        .route(
            "/api/v1/admin/moderation/review",
            post(review_handler::<Q, R, A>),
        )
        .route(
            "/api/v1/admin/agents/:slug/subscription",
            post(override_handler::<Q, R, A>),
        )
        .with_state(service)
}

pub(crate) async fn pending_handler<Q, R, A>(
    State(service): State<Arc<ModerationService<Q, R, A>>>,
) -> Response
where
    Q: ModerationQueue + 'static,
    R: ProfileRepository + 'static,
    A: AdminAuditLog + 'static,
{
    match service.pending() {
        Ok(items) => (StatusCode::OK, axum::Json(json!({ "items": items }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn review_handler<Q, R, A>(
    State(service): State<Arc<ModerationService<Q, R, A>>>,
    axum::Json(request): axum::Json<ReviewRequest>,
) -> Response
where
    Q: ModerationQueue + 'static,
    R: ProfileRepository + 'static,
    A: AdminAuditLog + 'static,
{
    match service.review(request, Utc::now()) {
        Ok(outcome) => (
            StatusCode::OK,
            axum::Json(json!({
                "success": true,
                "action": outcome.action,
                "already_reviewed": outcome.already_reviewed,
            })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn override_handler<Q, R, A>(
    State(service): State<Arc<ModerationService<Q, R, A>>>,
    Path(slug): Path<String>,
    axum::Json(request): axum::Json<OverrideRequest>,
) -> Response
where
    Q: ModerationQueue + 'static,
    R: ProfileRepository + 'static,
    A: AdminAuditLog + 'static,
{
    match service.override_subscription(&slug, request, Utc::now()) {
        Ok(subscription) => (
            StatusCode::OK,
            axum::Json(json!({
                "success": true,
                "subscription": subscription,
            })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ModerationError) -> Response {
    let status = if error.is_client_fault() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let payload = json!({
        "success": false,
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
