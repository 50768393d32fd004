use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use super::service::DashboardService;
use crate::error::error_response;
use crate::members::domain::MemberId;
use crate::repository::{LoanRepository, MemberRepository, TransactionLedger};

pub fn dashboard_router<M, T, L>(service: Arc<DashboardService<M, T, L>>) -> Router
where
    M: MemberRepository + 'static,
    T: TransactionLedger + 'static,
    L: LoanRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/members/:member_id/dashboard",
            get(dashboard_handler::<M, T, L>),
        )
        .with_state(service)
}

pub(crate) async fn dashboard_handler<M, T, L>(
    State(service): State<Arc<DashboardService<M, T, L>>>,
    Path(member_id): Path<String>,
) -> Response
where
    M: MemberRepository + 'static,
    T: TransactionLedger + 'static,
    L: LoanRepository + 'static,
{
    match service.snapshot(&MemberId(member_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err.kind(), err),
    }
}
