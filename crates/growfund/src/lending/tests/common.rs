use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

pub(super) use crate::testing::{
    at, saver, MemoryLoans, MemoryMembers, ReadOnlyLoans,
};

use crate::lending::{lending_router, LendingService, LoanRequest};
use crate::members::domain::{Member, MemberId};
use crate::repository::{MemberRepository, RepositoryError};

pub(super) const MEMBER: &str = "mbr-000101";

/// Four weekly saves and ₦100,000 banked: Boost unlocked, Ascend locked.
pub(super) fn boost_saver() -> Member {
    saver(MEMBER, 4, 100_000.0)
}

pub(super) fn member_id() -> MemberId {
    MemberId(MEMBER.to_string())
}

pub(super) fn request(loan_type: &str, amount: f64, method: &str) -> LoanRequest {
    LoanRequest {
        loan_type: loan_type.to_string(),
        amount,
        repayment_method: method.to_string(),
    }
}

pub(super) fn build_service(
    member: Member,
) -> (
    LendingService<MemoryMembers, MemoryLoans>,
    Arc<MemoryMembers>,
    Arc<MemoryLoans>,
) {
    let members = Arc::new(MemoryMembers::with([member]));
    let loans = Arc::new(MemoryLoans::default());
    let service = LendingService::new(members.clone(), loans.clone());
    (service, members, loans)
}

pub(super) fn lending_router_with_service(
    service: LendingService<MemoryMembers, MemoryLoans>,
) -> axum::Router {
    lending_router(Arc::new(service))
}

pub(super) struct UnavailableMembers;

impl MemberRepository for UnavailableMembers {
    fn insert(&self, _member: Member) -> Result<Member, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _member: Member) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &MemberId) -> Result<Option<Member>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
