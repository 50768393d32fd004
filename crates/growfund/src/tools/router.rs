use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::Utc;

use super::domain::InvoiceRequest;
use super::service::InvoiceService;
use crate::error::error_response;
use crate::members::domain::MemberId;
use crate::repository::MemberRepository;

pub fn invoice_router<M>(service: Arc<InvoiceService<M>>) -> Router
where
    M: MemberRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/members/:member_id/invoices",
            post(create_invoice_handler::<M>),
        )
        .with_state(service)
}

pub(crate) async fn create_invoice_handler<M>(
    State(service): State<Arc<InvoiceService<M>>>,
    Path(member_id): Path<String>,
    axum::Json(request): axum::Json<InvoiceRequest>,
) -> Response
where
    M: MemberRepository + 'static,
{
    match service.create(&MemberId(member_id), request, Utc::now()) {
        Ok(invoice) => (StatusCode::CREATED, axum::Json(invoice)).into_response(),
        Err(err) => error_response(err.kind(), err),
    }
}
