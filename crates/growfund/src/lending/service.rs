use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::domain::{completed_loan_count, LoanApplication, LoanId, LoanOffer, LoanStatus};
use super::eligibility::offers_for_member;
use super::lifecycle::{advance, LifecycleError};
use super::processor::{submit_application, ApplicationError, LoanRequest};
use crate::error::ErrorKind;
use crate::members::domain::{Member, MemberId};
use crate::members::score::compute_score;
use crate::repository::{LoanRepository, MemberRepository, RepositoryError};

/// Service composing eligibility, pricing, and the loan lifecycle over storage.
pub struct LendingService<M, L> {
    members: Arc<M>,
    loans: Arc<L>,
}

static LOAN_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_loan_id() -> LoanId {
    let id = LOAN_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LoanId(format!("loan-{id:06}"))
}

impl<M, L> LendingService<M, L>
where
    M: MemberRepository + 'static,
    L: LoanRepository + 'static,
{
    pub fn new(members: Arc<M>, loans: Arc<L>) -> Self {
        Self { members, loans }
    }

    /// Offers the member could apply for right now.
    pub fn offers(&self, member_id: &MemberId) -> Result<Vec<LoanOffer>, LendingServiceError> {
        let member = self.member(member_id)?;
        let history = self.loans.for_member(member_id)?;
        Ok(offers_for_member(&member, current_score(&member, &history)))
    }

    /// Validate, price, and persist a pending loan application.
    pub fn submit(
        &self,
        member_id: &MemberId,
        request: LoanRequest,
        now: DateTime<Utc>,
    ) -> Result<LoanApplication, LendingServiceError> {
        let member = self.member(member_id)?;
        let history = self.loans.for_member(member_id)?;
        let offers = offers_for_member(&member, current_score(&member, &history));

        let terms = submit_application(&offers, &request, now).map_err(|err| {
            warn!(
                member_id = %member_id,
                loan_type = %request.loan_type,
                amount = request.amount,
                kind = err.kind().label(),
                "loan application rejected"
            );
            err
        })?;

        let loan = LoanApplication {
            loan_id: next_loan_id(),
            member_id: member_id.clone(),
            product: terms.product,
            amount: terms.amount,
            fee: terms.fee,
            total_repayment: terms.total_repayment,
            repayment_method: terms.repayment_method,
            status: LoanStatus::Pending,
            application_date: terms.applied_at,
            approval_date: None,
            disbursement_date: None,
            due_date: terms.due_date,
            repayments: terms.schedule,
        };

        let stored = self.loans.insert(loan)?;
        info!(
            member_id = %member_id,
            loan_id = %stored.loan_id,
            product = %stored.product,
            method = %stored.repayment_method,
            amount = stored.amount,
            total_repayment = stored.total_repayment,
            "loan application submitted"
        );
        Ok(stored)
    }

    /// The member's loans, newest application first.
    pub fn loans(&self, member_id: &MemberId) -> Result<Vec<LoanApplication>, LendingServiceError> {
        self.member(member_id)?;
        let mut loans = self.loans.for_member(member_id)?;
        loans.sort_by(|a, b| b.application_date.cmp(&a.application_date));
        Ok(loans)
    }

    pub fn get(&self, loan_id: &LoanId) -> Result<LoanApplication, LendingServiceError> {
        let loan = self
            .loans
            .fetch(loan_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(loan)
    }

    /// Move a loan along its lifecycle and persist the result.
    pub fn transition(
        &self,
        loan_id: &LoanId,
        next: LoanStatus,
        now: DateTime<Utc>,
    ) -> Result<LoanApplication, LendingServiceError> {
        let mut loan = self.get(loan_id)?;
        let previous = loan.status;
        advance(&mut loan, next, now)?;
        self.loans.update(loan.clone())?;

        info!(
            loan_id = %loan_id,
            from = %previous,
            to = %next,
            "loan status changed"
        );
        Ok(loan)
    }

    fn member(&self, member_id: &MemberId) -> Result<Member, LendingServiceError> {
        let member = self
            .members
            .fetch(member_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(member)
    }
}

/// Score recomputed from the member's savings state and loan history.
pub fn current_score(member: &Member, history: &[LoanApplication]) -> u16 {
    compute_score(
        member.savings_streak,
        member.total_saved,
        completed_loan_count(history),
    )
}

/// Error raised by the lending service.
#[derive(Debug, thiserror::Error)]
pub enum LendingServiceError {
    #[error(transparent)]
    Application(#[from] ApplicationError),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl LendingServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LendingServiceError::Application(err) => err.kind(),
            LendingServiceError::Lifecycle(_) => ErrorKind::Validation,
            LendingServiceError::Repository(err) => ErrorKind::from(err),
        }
    }
}
