use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json, Router};
use growfund::dashboard::{dashboard_router, DashboardService};
use growfund::lending::{lending_router, LendingService};
use growfund::repository::{LoanRepository, MemberRepository, TransactionLedger};
use growfund::savings::{savings_router, SavingsService};
use growfund::tools::{invoice_router, InvoiceService};
use serde_json::json;
use std::sync::Arc;

/// Services the HTTP surface is built from, sharing one set of stores.
pub(crate) struct Services<M, T, L> {
    pub(crate) savings: Arc<SavingsService<M, T>>,
    pub(crate) lending: Arc<LendingService<M, L>>,
    pub(crate) dashboard: Arc<DashboardService<M, T, L>>,
    pub(crate) invoices: Arc<InvoiceService<M>>,
}

impl<M, T, L> Services<M, T, L>
where
    M: MemberRepository + 'static,
    T: TransactionLedger + 'static,
    L: LoanRepository + 'static,
{
    pub(crate) fn new(
        members: Arc<M>,
        ledger: Arc<T>,
        loans: Arc<L>,
        recent_transactions: usize,
    ) -> Self {
        Self {
            savings: Arc::new(SavingsService::new(members.clone(), ledger.clone())),
            lending: Arc::new(LendingService::new(members.clone(), loans.clone())),
            invoices: Arc::new(InvoiceService::new(members.clone())),
            dashboard: Arc::new(DashboardService::new(
                members,
                ledger,
                loans,
                recent_transactions,
            )),
        }
    }
}

pub(crate) fn with_growfund_routes<M, T, L>(services: Services<M, T, L>) -> Router
where
    M: MemberRepository + 'static,
    T: TransactionLedger + 'static,
    L: LoanRepository + 'static,
{
    savings_router(services.savings)
        .merge(lending_router(services.lending))
        .merge(dashboard_router(services.dashboard))
        .merge(invoice_router(services.invoices))
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
