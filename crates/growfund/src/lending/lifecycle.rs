use chrono::{DateTime, Utc};

use super::domain::{InstallmentStatus, LoanApplication, LoanStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("loan cannot move from {from} to {to}")]
pub struct LifecycleError {
    pub from: LoanStatus,
    pub to: LoanStatus,
}

impl LoanStatus {
    /// `pending → approved → disbursed → active → completed`, with `defaulted`
    /// reachable from any post-approval, non-terminal state.
    pub const fn can_transition_to(self, next: LoanStatus) -> bool {
        matches!(
            (self, next),
            (LoanStatus::Pending, LoanStatus::Approved)
                | (LoanStatus::Approved, LoanStatus::Disbursed)
                | (LoanStatus::Disbursed, LoanStatus::Active)
                | (LoanStatus::Active, LoanStatus::Completed)
                | (
                    LoanStatus::Approved | LoanStatus::Disbursed | LoanStatus::Active,
                    LoanStatus::Defaulted
                )
        )
    }
}

/// Move `loan` to `next`, stamping the lifecycle dates that go with it.
pub fn advance(
    loan: &mut LoanApplication,
    next: LoanStatus,
    at: DateTime<Utc>,
) -> Result<(), LifecycleError> {
    if !loan.status.can_transition_to(next) {
        return Err(LifecycleError {
            from: loan.status,
            to: next,
        });
    }

    match next {
        LoanStatus::Approved => loan.approval_date = Some(at),
        LoanStatus::Disbursed => loan.disbursement_date = Some(at),
        LoanStatus::Completed => {
            for installment in &mut loan.repayments {
                if installment.status != InstallmentStatus::Paid {
                    installment.status = InstallmentStatus::Paid;
                    installment.paid_date = Some(at);
                }
            }
        }
        LoanStatus::Pending | LoanStatus::Active | LoanStatus::Defaulted => {}
    }

    loan.status = next;
    Ok(())
}
