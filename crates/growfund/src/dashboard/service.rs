use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::ErrorKind;
use crate::lending::domain::{completed_loan_count, LoanApplication, LoanOffer};
use crate::lending::eligibility::offers_for_member;
use crate::members::domain::{Member, MemberId, MemberProfile, SavingsPlan};
use crate::members::score::ScoreBreakdown;
use crate::repository::{LoanRepository, MemberRepository, RepositoryError, TransactionLedger};
use crate::savings::domain::SavingsTransaction;

/// Everything the member home screen renders in one read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub member_id: MemberId,
    pub profile: MemberProfile,
    pub score: u16,
    pub score_breakdown: ScoreBreakdown,
    pub total_saved: f64,
    pub savings_streak: u32,
    pub savings_plan: Option<SavingsPlan>,
    pub last_payment_date: Option<DateTime<Utc>>,
    pub next_payment_date: Option<DateTime<Utc>>,
    pub recent_transactions: Vec<SavingsTransaction>,
    pub active_loans: Vec<LoanApplication>,
    pub available_offers: Vec<LoanOffer>,
}

pub struct DashboardService<M, T, L> {
    members: Arc<M>,
    ledger: Arc<T>,
    loans: Arc<L>,
    recent_transactions: usize,
}

impl<M, T, L> DashboardService<M, T, L>
where
    M: MemberRepository + 'static,
    T: TransactionLedger + 'static,
    L: LoanRepository + 'static,
{
    pub fn new(members: Arc<M>, ledger: Arc<T>, loans: Arc<L>, recent_transactions: usize) -> Self {
        Self {
            members,
            ledger,
            loans,
            recent_transactions,
        }
    }

    /// Refresh the stored score and assemble the member's dashboard.
    pub fn snapshot(&self, member_id: &MemberId) -> Result<DashboardView, DashboardError> {
        let mut member = self
            .members
            .fetch(member_id)?
            .ok_or(RepositoryError::NotFound)?;
        let recent_transactions = self.ledger.recent(member_id, self.recent_transactions)?;
        let mut loans = self.loans.for_member(member_id)?;

        let breakdown = ScoreBreakdown::compute(
            member.savings_streak,
            member.total_saved,
            completed_loan_count(&loans),
        );
        if member.score != breakdown.total {
            debug!(
                member_id = %member_id,
                previous = member.score,
                score = breakdown.total,
                "member score refreshed"
            );
            member.score = breakdown.total;
            self.members.update(member.clone())?;
        }

        let available_offers = offers_for_member(&member, breakdown.total);
        loans.retain(|loan| loan.status.is_outstanding());
        loans.sort_by(|a, b| b.application_date.cmp(&a.application_date));

        let Member {
            member_id,
            profile,
            score,
            savings_plan,
            total_saved,
            savings_streak,
            last_payment_date,
            next_payment_date,
            ..
        } = member;

        Ok(DashboardView {
            member_id,
            profile,
            score,
            score_breakdown: breakdown,
            total_saved,
            savings_streak,
            savings_plan,
            last_payment_date,
            next_payment_date,
            recent_transactions,
            active_loans: loans,
            available_offers,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl DashboardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DashboardError::Repository(err) => ErrorKind::from(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lending::domain::{LoanProduct, LoanStatus};
    use crate::savings::domain::{TransactionId, TransactionKind, TransactionStatus};
    use crate::testing::{
        at, loan, saver, MemoryLedger, MemoryLoans, MemoryMembers, UnavailableLedger,
    };

    fn deposit(id: u32, member_id: &str, day: u32) -> SavingsTransaction {
        SavingsTransaction {
            transaction_id: TransactionId(format!("txn-{id:06}")),
            member_id: MemberId(member_id.to_string()),
            amount: 25_000.0,
            kind: TransactionKind::Savings,
            status: TransactionStatus::Completed,
            payment_method: None,
            transaction_ref: None,
            created_at: at(2025, 3, day),
            description: "weekly savings payment".to_string(),
        }
    }

    fn ledger_with(entries: Vec<SavingsTransaction>) -> MemoryLedger {
        let ledger = MemoryLedger::default();
        *ledger.entries.lock().expect("lock") = entries;
        ledger
    }

    #[test]
    fn snapshot_refreshes_and_persists_score() {
        let members = Arc::new(MemoryMembers::with([saver("mbr-1", 4, 100_000.0)]));
        let service = DashboardService::new(
            members.clone(),
            Arc::new(MemoryLedger::default()),
            Arc::new(MemoryLoans::default()),
            10,
        );

        let view = service.snapshot(&MemberId("mbr-1".to_string())).expect("dashboard");

        // 450 + 4 * 5 + 10 * 2
        assert_eq!(view.score, 490);
        assert_eq!(view.score_breakdown.streak_points, 20);
        assert_eq!(view.score_breakdown.savings_points, 20);
        assert_eq!(members.get("mbr-1").expect("stored").score, 490);
    }

    #[test]
    fn snapshot_carries_contact_details() {
        let service = DashboardService::new(
            Arc::new(MemoryMembers::with([saver("mbr-1", 0, 0.0)])),
            Arc::new(MemoryLedger::default()),
            Arc::new(MemoryLoans::default()),
            10,
        );

        let view = service.snapshot(&MemberId("mbr-1".to_string())).expect("dashboard");
        assert_eq!(view.profile.name, "Amaka Obi");
        assert_eq!(view.profile.phone, "+2348030000001");
        assert_eq!(view.profile.business.as_deref(), Some("Amaka Fabrics"));

        let body = serde_json::to_value(&view).expect("serialize");
        assert_eq!(body["profile"]["phone"], "+2348030000001");
        assert_eq!(body["profile"]["business"], "Amaka Fabrics");
    }

    #[test]
    fn offers_use_the_refreshed_score() {
        let members = Arc::new(MemoryMembers::with([saver("mbr-1", 4, 100_000.0)]));
        let service = DashboardService::new(
            members,
            Arc::new(MemoryLedger::default()),
            Arc::new(MemoryLoans::default()),
            10,
        );

        let view = service.snapshot(&MemberId("mbr-1".to_string())).expect("dashboard");

        assert_eq!(view.available_offers.len(), 1);
        let boost = &view.available_offers[0];
        assert_eq!(boost.product, LoanProduct::Boost);
        // floor(100000 * 2.5 * 490 / 450)
        assert_eq!(boost.max_amount, 272_222.0);
    }

    #[test]
    fn completed_loans_count_and_only_open_loans_are_listed() {
        let members = Arc::new(MemoryMembers::with([saver("mbr-1", 0, 0.0)]));
        let loans = MemoryLoans::with([
            loan("loan-a", "mbr-1", LoanStatus::Completed, at(2025, 1, 10)),
            loan("loan-b", "mbr-1", LoanStatus::Disbursed, at(2025, 2, 10)),
            loan("loan-c", "mbr-1", LoanStatus::Pending, at(2025, 3, 10)),
            loan("loan-d", "mbr-1", LoanStatus::Active, at(2025, 3, 1)),
            loan("loan-e", "mbr-2", LoanStatus::Active, at(2025, 3, 1)),
        ]);
        let service = DashboardService::new(
            members,
            Arc::new(MemoryLedger::default()),
            Arc::new(loans),
            10,
        );

        let view = service.snapshot(&MemberId("mbr-1".to_string())).expect("dashboard");

        assert_eq!(view.score, 475);
        let ids: Vec<&str> = view
            .active_loans
            .iter()
            .map(|loan| loan.loan_id.0.as_str())
            .collect();
        assert_eq!(ids, vec!["loan-d", "loan-b"]);
        assert!(view.available_offers.is_empty());
    }

    #[test]
    fn transaction_window_is_most_recent_first() {
        let members = Arc::new(MemoryMembers::with([saver("mbr-1", 3, 75_000.0)]));
        let ledger = ledger_with(vec![
            deposit(1, "mbr-1", 3),
            deposit(2, "mbr-2", 4),
            deposit(3, "mbr-1", 10),
            deposit(4, "mbr-1", 17),
        ]);
        let service = DashboardService::new(
            members,
            Arc::new(ledger),
            Arc::new(MemoryLoans::default()),
            2,
        );

        let view = service.snapshot(&MemberId("mbr-1".to_string())).expect("dashboard");
        let ids: Vec<&str> = view
            .recent_transactions
            .iter()
            .map(|tx| tx.transaction_id.0.as_str())
            .collect();
        assert_eq!(ids, vec!["txn-000004", "txn-000003"]);
    }

    #[test]
    fn missing_member_and_offline_ledger_are_classified() {
        let service = DashboardService::new(
            Arc::new(MemoryMembers::default()),
            Arc::new(MemoryLedger::default()),
            Arc::new(MemoryLoans::default()),
            10,
        );
        let err = service
            .snapshot(&MemberId("mbr-404".to_string()))
            .expect_err("missing");
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let service = DashboardService::new(
            Arc::new(MemoryMembers::with([saver("mbr-1", 1, 5_000.0)])),
            Arc::new(UnavailableLedger),
            Arc::new(MemoryLoans::default()),
            10,
        );
        let err = service
            .snapshot(&MemberId("mbr-1".to_string()))
            .expect_err("offline");
        assert_eq!(err.kind(), ErrorKind::Persistence);
    }
}
