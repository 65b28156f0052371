use crate::cli::ServeArgs;
use crate::infra::{apply_dataset_override, load_table, AppState, JobData};
use crate::routes::job_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use job_insights::config::AppConfig;
use job_insights::error::AppError;
use job_insights::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    apply_dataset_override(&mut config, args.dataset.take());

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let table = load_table(&config)?;
    let data = JobData::new(table, config.report.clone());

    let app = job_routes()
        .layer(Extension(data))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        dataset = %config.dataset.path.display(),
        "job insights service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
