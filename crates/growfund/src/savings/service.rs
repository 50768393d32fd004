use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::domain::{
    PaymentReceipt, PaymentRequest, PlanConfirmation, PlanRequest, SavingsTransaction,
    TransactionId, TransactionKind, TransactionStatus,
};
use crate::calendar::CalendarError;
use crate::error::ErrorKind;
use crate::members::domain::{Member, MemberId, MemberProfile, SavingsFrequency, SavingsPlan};
use crate::money::{is_positive_amount, Naira};
use crate::repository::{MemberRepository, RepositoryError, TransactionLedger};

/// Validation failures for plans and contributions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SavingsError {
    #[error("amount must be between {min} and {max} for {frequency} plans")]
    PlanAmountOutOfRange {
        frequency: SavingsFrequency,
        min: Naira,
        max: Naira,
        found: Naira,
    },
    #[error("no active savings plan found")]
    NoActivePlan,
    #[error("payment amount must be a positive number of naira")]
    InvalidAmount { found: f64 },
    #[error("member name and phone are required")]
    IncompleteProfile,
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

/// Service managing member accounts, savings plans, and the contribution ledger.
pub struct SavingsService<M, T> {
    members: Arc<M>,
    ledger: Arc<T>,
}

static MEMBER_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static TRANSACTION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_member_id() -> MemberId {
    let id = MEMBER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    MemberId(format!("mbr-{id:06}"))
}

fn next_transaction_id() -> TransactionId {
    let id = TRANSACTION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    TransactionId(format!("txn-{id:06}"))
}

impl<M, T> SavingsService<M, T>
where
    M: MemberRepository + 'static,
    T: TransactionLedger + 'static,
{
    pub fn new(members: Arc<M>, ledger: Arc<T>) -> Self {
        Self { members, ledger }
    }

    /// Open a member account with default savings state.
    pub fn open_account(
        &self,
        profile: MemberProfile,
        now: DateTime<Utc>,
    ) -> Result<Member, SavingsServiceError> {
        if profile.name.trim().is_empty() || profile.phone.trim().is_empty() {
            return Err(SavingsError::IncompleteProfile.into());
        }

        let member = self
            .members
            .insert(Member::open(next_member_id(), profile, now))?;
        info!(member_id = %member.member_id, "member account opened");
        Ok(member)
    }

    /// Create or replace the member's plan once the amount is within bounds.
    pub fn create_plan(
        &self,
        member_id: &MemberId,
        request: PlanRequest,
        now: DateTime<Utc>,
    ) -> Result<PlanConfirmation, SavingsServiceError> {
        let mut member = self.member(member_id)?;

        let limits = request.frequency.limits();
        if !limits.contains(request.amount) {
            return Err(SavingsError::PlanAmountOutOfRange {
                frequency: request.frequency,
                min: Naira(limits.min),
                max: Naira(limits.max),
                found: Naira(request.amount),
            }
            .into());
        }

        let next_payment_date = request
            .frequency
            .next_due(now)
            .map_err(SavingsError::from)?;
        let savings_plan = SavingsPlan {
            frequency: request.frequency,
            amount: request.amount,
            start_date: now,
            is_active: true,
        };

        member.savings_plan = Some(savings_plan.clone());
        member.next_payment_date = Some(next_payment_date);
        self.members.update(member)?;

        info!(
            member_id = %member_id,
            frequency = %request.frequency,
            amount = request.amount,
            "savings plan created"
        );
        Ok(PlanConfirmation {
            savings_plan,
            next_payment_date,
        })
    }

    /// Record a contribution, growing the balance and the streak.
    ///
    /// The ledger entry starts pending and only becomes completed once the
    /// member totals are stored. If either write fails the entry is marked
    /// failed, so it never counts without a matching balance change.
    pub fn record_payment(
        &self,
        member_id: &MemberId,
        request: PaymentRequest,
        now: DateTime<Utc>,
    ) -> Result<PaymentReceipt, SavingsServiceError> {
        let mut member = self.member(member_id)?;
        let frequency = member
            .active_plan()
            .map(|plan| plan.frequency)
            .ok_or(SavingsError::NoActivePlan)?;

        if !is_positive_amount(request.amount) {
            return Err(SavingsError::InvalidAmount {
                found: request.amount,
            }
            .into());
        }

        let next_payment_date = frequency.next_due(now).map_err(SavingsError::from)?;

        let pending = self.ledger.append(SavingsTransaction {
            transaction_id: next_transaction_id(),
            member_id: member_id.clone(),
            amount: request.amount,
            kind: TransactionKind::Savings,
            status: TransactionStatus::Pending,
            payment_method: request.payment_method,
            transaction_ref: request.transaction_ref,
            created_at: now,
            description: format!("{frequency} savings payment"),
        })?;

        let previous = member.clone();
        member.total_saved += request.amount;
        member.savings_streak += 1;
        member.last_payment_date = Some(now);
        member.next_payment_date = Some(next_payment_date);
        let total_saved = member.total_saved;
        let savings_streak = member.savings_streak;
        if let Err(err) = self.members.update(member) {
            self.mark_failed(&pending.transaction_id);
            return Err(err.into());
        }

        let transaction = match self
            .ledger
            .set_status(&pending.transaction_id, TransactionStatus::Completed)
        {
            Ok(transaction) => transaction,
            Err(err) => {
                if let Err(restore) = self.members.update(previous) {
                    warn!(
                        member_id = %member_id,
                        error = %restore,
                        "failed to restore member after ledger error"
                    );
                }
                self.mark_failed(&pending.transaction_id);
                return Err(err.into());
            }
        };

        info!(
            member_id = %member_id,
            transaction_id = %transaction.transaction_id,
            amount = transaction.amount,
            total_saved,
            savings_streak,
            "savings payment recorded"
        );
        Ok(PaymentReceipt {
            transaction,
            total_saved,
            savings_streak,
            next_payment_date,
        })
    }

    pub fn get(&self, member_id: &MemberId) -> Result<Member, SavingsServiceError> {
        self.member(member_id)
    }

    fn mark_failed(&self, transaction_id: &TransactionId) {
        if let Err(err) = self
            .ledger
            .set_status(transaction_id, TransactionStatus::Failed)
        {
            warn!(
                transaction_id = %transaction_id,
                error = %err,
                "failed to mark abandoned payment"
            );
        }
    }

    fn member(&self, member_id: &MemberId) -> Result<Member, SavingsServiceError> {
        let member = self
            .members
            .fetch(member_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(member)
    }
}

/// Error raised by the savings service.
#[derive(Debug, thiserror::Error)]
pub enum SavingsServiceError {
    #[error(transparent)]
    Savings(#[from] SavingsError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl SavingsServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SavingsServiceError::Savings(_) => ErrorKind::Validation,
            SavingsServiceError::Repository(err) => ErrorKind::from(err),
        }
    }
}
