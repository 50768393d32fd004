use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::Utc;

use super::domain::{PaymentRequest, PlanRequest};
use super::service::SavingsService;
use crate::error::error_response;
use crate::members::domain::{MemberId, MemberProfile};
use crate::repository::{MemberRepository, TransactionLedger};

/// Account opening, savings plan, and contribution endpoints.
pub fn savings_router<M, T>(service: Arc<SavingsService<M, T>>) -> Router
where
    M: MemberRepository + 'static,
    T: TransactionLedger + 'static,
{
    Router::new()
        .route("/api/v1/members", post(open_account_handler::<M, T>))
        .route(
            "/api/v1/members/:member_id/savings/plan",
            post(create_plan_handler::<M, T>),
        )
        .route(
            "/api/v1/members/:member_id/savings/payments",
            post(record_payment_handler::<M, T>),
        )
        .with_state(service)
}

pub(crate) async fn open_account_handler<M, T>(
    State(service): State<Arc<SavingsService<M, T>>>,
    axum::Json(profile): axum::Json<MemberProfile>,
) -> Response
where
    M: MemberRepository + 'static,
    T: TransactionLedger + 'static,
{
    match service.open_account(profile, Utc::now()) {
        Ok(member) => (StatusCode::CREATED, axum::Json(member)).into_response(),
        Err(err) => error_response(err.kind(), err),
    }
}

pub(crate) async fn create_plan_handler<M, T>(
    State(service): State<Arc<SavingsService<M, T>>>,
    Path(member_id): Path<String>,
    axum::Json(request): axum::Json<PlanRequest>,
) -> Response
where
    M: MemberRepository + 'static,
    T: TransactionLedger + 'static,
{
    match service.create_plan(&MemberId(member_id), request, Utc::now()) {
        Ok(confirmation) => (StatusCode::OK, axum::Json(confirmation)).into_response(),
        Err(err) => error_response(err.kind(), err),
    }
}

pub(crate) async fn record_payment_handler<M, T>(
    State(service): State<Arc<SavingsService<M, T>>>,
    Path(member_id): Path<String>,
    axum::Json(request): axum::Json<PaymentRequest>,
) -> Response
where
    M: MemberRepository + 'static,
    T: TransactionLedger + 'static,
{
    match service.record_payment(&MemberId(member_id), request, Utc::now()) {
        Ok(receipt) => (StatusCode::CREATED, axum::Json(receipt)).into_response(),
        Err(err) => error_response(err.kind(), err),
    }
}
