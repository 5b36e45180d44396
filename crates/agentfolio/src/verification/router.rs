use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::service::{VerificationError, VerificationService};
use super::store::{ChallengeStore, CodeSender};

/// Router builder exposing the send-code / verify-code endpoints.
pub fn verification_router<S, C>(service: Arc<VerificationService<S, C>>) -> Router
where
    S: ChallengeStore + 'static,
    C: CodeSender + 'static,
{
    Router::new()
        .route(
            "/api/v1/verification/send-code",
            post(send_code_handler::<S, C>),
        )
        .route(
            "/api/v1/verification/verify-code",
            post(verify_code_handler::<S, C>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SendCodeRequest {
    pub(crate) phone: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerifyCodeRequest {
    pub(crate) phone: String,
    pub(crate) code: String,
}

pub(crate) async fn send_code_handler<S, C>(
    State(service): State<Arc<VerificationService<S, C>>>,
    axum::Json(request): axum::Json<SendCodeRequest>,
) -> Response
where
    S: ChallengeStore + 'static,
    C: CodeSender + 'static,
{
    match service.send_code(&request.phone, Utc::now()) {
        Ok(_) => (StatusCode::OK, axum::Json(json!({ "ok": true }))).into_response(),
        Err(error) => envelope_error(error),
    }
}

pub(crate) async fn verify_code_handler<S, C>(
    State(service): State<Arc<VerificationService<S, C>>>,
    axum::Json(request): axum::Json<VerifyCodeRequest>,
) -> Response
where
    S: ChallengeStore + 'static,
    C: CodeSender + 'static,
{
    match service.verify_code(&request.phone, &request.code, Utc::now()) {
        Ok(_) => (StatusCode::OK, axum::Json(json!({ "ok": true }))).into_response(),
        Err(error) => envelope_error(error),
    }
}

fn envelope_error(error: VerificationError) -> Response {
    let status = if error.is_client_fault() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let payload = json!({
        "ok": false,
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
