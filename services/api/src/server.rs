use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::dashboard_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use usestage_carbon::config::AppConfig;
use usestage_carbon::error::AppError;
use usestage_carbon::sources::{open_source, DataSource};
use usestage_carbon::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load_with_database_url(args.db_url.take())?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let source: Arc<dyn DataSource> = Arc::from(open_source(&config.data.database_url)?);
    info!(source = %source.describe(), "dashboard data source configured");

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        source,
        building: config.building,
    };

    let app = dashboard_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "use-stage carbon dashboard ready");

    axum::serve(listener, app).await?;
    Ok(())
}
