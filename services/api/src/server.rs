use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryLoanRepository, InMemoryMemberRepository, InMemoryTransactionLedger,
};
use crate::routes::{with_growfund_routes, Services};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use growfund::config::AppConfig;
use growfund::error::AppError;
use growfund::telemetry;
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

    let services = Services::new(
        Arc::new(InMemoryMemberRepository::default()),
        Arc::new(InMemoryTransactionLedger::default()),
        Arc::new(InMemoryLoanRepository::default()),
        config.dashboard.recent_transactions,
    );

    let app = with_growfund_routes(services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "growfund service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
