use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;

use super::domain::{LoanId, LoanStatus};
use super::processor::LoanRequest;
use super::service::LendingService;
use crate::error::error_response;
use crate::members::domain::MemberId;
use crate::repository::{LoanRepository, MemberRepository};

/// Body of a lifecycle change request.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StatusChange {
    pub status: LoanStatus,
}

/// Router builder exposing loan application and lifecycle endpoints.
pub fn lending_router<M, L>(service: Arc<LendingService<M, L>>) -> Router
where
    M: MemberRepository + 'static,
    L: LoanRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/members/:member_id/loans",
            get(list_handler::<M, L>).post(submit_handler::<M, L>),
        )
        .route(
            "/api/v1/loans/:loan_id/status",
            post(transition_handler::<M, L>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<M, L>(
    State(service): State<Arc<LendingService<M, L>>>,
    Path(member_id): Path<String>,
    axum::Json(request): axum::Json<LoanRequest>,
) -> Response
where
    M: MemberRepository + 'static,
    L: LoanRepository + 'static,
{
    match service.submit(&MemberId(member_id), request, Utc::now()) {
        Ok(loan) => (StatusCode::CREATED, axum::Json(loan)).into_response(),
        Err(err) => error_response(err.kind(), err),
    }
}

pub(crate) async fn list_handler<M, L>(
    State(service): State<Arc<LendingService<M, L>>>,
    Path(member_id): Path<String>,
) -> Response
where
    M: MemberRepository + 'static,
    L: LoanRepository + 'static,
{
    match service.loans(&MemberId(member_id)) {
        Ok(loans) => (StatusCode::OK, axum::Json(loans)).into_response(),
        Err(err) => error_response(err.kind(), err),
    }
}

pub(crate) async fn transition_handler<M, L>(
    State(service): State<Arc<LendingService<M, L>>>,
    Path(loan_id): Path<String>,
    axum::Json(change): axum::Json<StatusChange>,
) -> Response
where
    M: MemberRepository + 'static,
    L: LoanRepository + 'static,
{
    match service.transition(&LoanId(loan_id), change.status, Utc::now()) {
        Ok(loan) => (StatusCode::OK, axum::Json(loan)).into_response(),
        Err(err) => error_response(err.kind(), err),
    }
}
