use crate::cli::ServeArgs;
use crate::infra::{
    AppState, DevCodeSender, InMemoryAuditLog, InMemoryChallengeStore, InMemoryLeadSink,
    InMemoryModerationQueue, InMemoryProfileRepository,
};
use crate::routes::with_app_routes;
use agentfolio::config::AppConfig;
use agentfolio::error::AppError;
use agentfolio::moderation::ModerationService;
use agentfolio::profiles::{PlanPolicy, ProfilePolicy, ProfileService};
use agentfolio::telemetry;
use agentfolio::verification::VerificationService;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryProfileRepository::default());
    let profiles = Arc::new(ProfileService::new(
        repository.clone(),
        Arc::new(InMemoryLeadSink::default()),
        ProfilePolicy::default(),
        PlanPolicy::default(),
    ));
    let verification = Arc::new(VerificationService::new(
        Arc::new(InMemoryChallengeStore::default()),
        Arc::new(DevCodeSender::default()),
        config.verification.clone(),
    ));
    let moderation = Arc::new(ModerationService::new(
        Arc::new(InMemoryModerationQueue::default()),
        repository,
        Arc::new(InMemoryAuditLog::default()),
    ));

    let app = with_app_routes(profiles, verification, moderation)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "agent profile platform ready");

    axum::serve(listener, app).await?;
    Ok(())
}
