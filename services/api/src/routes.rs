use crate::infra::AppState;
use agentfolio::moderation::{
    moderation_router, AdminAuditLog, ModerationQueue, ModerationService,
};
use agentfolio::profiles::{profile_router, LeadSink, ProfileRepository, ProfileService};
use agentfolio::verification::{
    verification_router, ChallengeStore, CodeSender, VerificationService,
};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

/// Merges the domain routers with the operational endpoints.
pub(crate) fn with_app_routes<R, L, S, C, Q, A>(
    profiles: Arc<ProfileService<R, L>>,
    verification: Arc<VerificationService<S, C>>,
    moderation: Arc<ModerationService<Q, R, A>>,
) -> axum::Router
where
    R: ProfileRepository + 'static,
    L: LeadSink + 'static,
    S: ChallengeStore + 'static,
    C: CodeSender + 'static,
    Q: ModerationQueue + 'static,
    A: AdminAuditLog + 'static,
{
    profile_router(profiles)
        .merge(verification_router(verification))
        .merge(moderation_router(moderation))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
