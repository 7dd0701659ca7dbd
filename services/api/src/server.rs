use crate::cli::ServeArgs;
use crate::infra::{seed_catalog, AppState, Catalog, TracingNotifier};
use crate::routes::with_adoption_routes;
use adopet::adoption::{AdoptionError, AdoptionService};
use adopet::config::AppConfig;
use adopet::error::AppError;
use adopet::telemetry;
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

    let catalog = if args.empty {
        Catalog::default()
    } else {
        seed_catalog().map_err(AdoptionError::from)?
    };
    let notifier = Arc::new(TracingNotifier::new(config.adoption.mail_from.clone()));
    let policy = config.adoption.policy();
    let adoption_limit = policy.adoption_limit;
    let adoption_service = Arc::new(AdoptionService::new(catalog.stores(), notifier, policy));

    let app = with_adoption_routes(adoption_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        adoption_limit,
        "adoption service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
