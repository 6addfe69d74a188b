use crate::cli::ServeArgs;
use crate::infra::{
    load_records, AppState, InMemoryEmployeeDirectory, InMemoryMatchSink, InMemoryRoleCatalog,
};
use crate::routes::with_matching_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use role_match::config::AppConfig;
use role_match::error::AppError;
use role_match::matching::{MatchOrchestrator, MatchingService};
use role_match::telemetry;
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

    let employees = match args.employees.take() {
        Some(path) => load_records(&path)?,
        None => Vec::new(),
    };
    let roles = match args.roles.take() {
        Some(path) => load_records(&path)?,
        None => Vec::new(),
    };
    info!(
        employees = employees.len(),
        roles = roles.len(),
        "seeded in-memory directory and catalog"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let directory = Arc::new(InMemoryEmployeeDirectory::with_employees(employees));
    let catalog = Arc::new(InMemoryRoleCatalog::with_roles(roles));
    let sink = Arc::new(InMemoryMatchSink::default());
    let orchestrator = MatchOrchestrator::from_config(&config.matching, &config.text);
    let matching_service = Arc::new(
        MatchingService::new(directory, catalog, sink, orchestrator)
            .with_default_top_n(config.matching.top_n),
    );

    let app = with_matching_routes(matching_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "role matching service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
