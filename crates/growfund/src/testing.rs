//! In-memory and failing storage doubles shared by the unit test suites.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::lending::domain::{
    Installment, InstallmentStatus, LoanApplication, LoanId, LoanProduct, LoanStatus,
    RepaymentMethod,
};
use crate::members::domain::{Member, MemberId, MemberProfile, SavingsFrequency, SavingsPlan};
use crate::repository::{LoanRepository, MemberRepository, RepositoryError, TransactionLedger};
use crate::savings::domain::{SavingsTransaction, TransactionId, TransactionStatus};

pub(crate) fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(crate) fn profile() -> MemberProfile {
    MemberProfile {
        name: "Amaka Obi".to_string(),
        phone: "+2348030000001".to_string(),
        email: Some("amaka@fabrics.ng".to_string()),
        business: Some("Amaka Fabrics".to_string()),
    }
}

/// A weekly saver with the given streak and balance.
pub(crate) fn saver(id: &str, streak: u32, total_saved: f64) -> Member {
    let mut member = Member::open(MemberId(id.to_string()), profile(), at(2025, 1, 6));
    member.savings_plan = Some(SavingsPlan {
        frequency: SavingsFrequency::Weekly,
        amount: 25_000.0,
        start_date: at(2025, 1, 6),
        is_active: true,
    });
    member.savings_streak = streak;
    member.total_saved = total_saved;
    member
}

/// One-time Boost loan of ₦50,000 in the given state.
pub(crate) fn loan(
    id: &str,
    member_id: &str,
    status: LoanStatus,
    applied: DateTime<Utc>,
) -> LoanApplication {
    LoanApplication {
        loan_id: LoanId(id.to_string()),
        member_id: MemberId(member_id.to_string()),
        product: LoanProduct::Boost,
        amount: 50_000.0,
        fee: 5_000.0,
        total_repayment: 55_000.0,
        repayment_method: RepaymentMethod::OneTime,
        status,
        application_date: applied,
        approval_date: None,
        disbursement_date: None,
        due_date: applied,
        repayments: vec![Installment {
            amount: 55_000.0,
            due_date: applied,
            paid_date: None,
            status: InstallmentStatus::Pending,
        }],
    }
}

#[derive(Default, Clone)]
pub(crate) struct MemoryMembers {
    pub(crate) records: Arc<Mutex<HashMap<MemberId, Member>>>,
}

impl MemoryMembers {
    pub(crate) fn with(members: impl IntoIterator<Item = Member>) -> Self {
        let store = Self::default();
        {
            let mut guard = store.records.lock().expect("member mutex poisoned");
            for member in members {
                guard.insert(member.member_id.clone(), member);
            }
        }
        store
    }

    pub(crate) fn get(&self, id: &str) -> Option<Member> {
        self.records
            .lock()
            .expect("member mutex poisoned")
            .get(&MemberId(id.to_string()))
            .cloned()
    }
}

impl MemberRepository for MemoryMembers {
    fn insert(&self, member: Member) -> Result<Member, RepositoryError> {
        let mut guard = self.records.lock().expect("member mutex poisoned");
        if guard.contains_key(&member.member_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(member.member_id.clone(), member.clone());
        Ok(member)
    }

    fn update(&self, member: Member) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("member mutex poisoned");
        guard.insert(member.member_id.clone(), member);
        Ok(())
    }

    fn fetch(&self, id: &MemberId) -> Result<Option<Member>, RepositoryError> {
        let guard = self.records.lock().expect("member mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

/// Member store whose updates can be switched off mid-test.
#[derive(Default, Clone)]
pub(crate) struct FlakyMembers {
    pub(crate) inner: MemoryMembers,
    pub(crate) reject_updates: Arc<AtomicBool>,
}

impl FlakyMembers {
    pub(crate) fn reject_updates(&self, reject: bool) {
        self.reject_updates.store(reject, Ordering::SeqCst);
    }
}

impl MemberRepository for FlakyMembers {
    fn insert(&self, member: Member) -> Result<Member, RepositoryError> {
        self.inner.insert(member)
    }

    fn update(&self, member: Member) -> Result<(), RepositoryError> {
        if self.reject_updates.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("write timeout".to_string()));
        }
        self.inner.update(member)
    }

    fn fetch(&self, id: &MemberId) -> Result<Option<Member>, RepositoryError> {
        self.inner.fetch(id)
    }
}

#[derive(Default, Clone)]
pub(crate) struct MemoryLedger {
    pub(crate) entries: Arc<Mutex<Vec<SavingsTransaction>>>,
}

impl TransactionLedger for MemoryLedger {
    fn append(
        &self,
        transaction: SavingsTransaction,
    ) -> Result<SavingsTransaction, RepositoryError> {
        self.entries
            .lock()
            .expect("ledger mutex poisoned")
            .push(transaction.clone());
        Ok(transaction)
    }

    fn set_status(
        &self,
        id: &TransactionId,
        status: TransactionStatus,
    ) -> Result<SavingsTransaction, RepositoryError> {
        let mut guard = self.entries.lock().expect("ledger mutex poisoned");
        let entry = guard
            .iter_mut()
            .find(|entry| &entry.transaction_id == id)
            .ok_or(RepositoryError::NotFound)?;
        entry.status = status;
        Ok(entry.clone())
    }

    fn recent(
        &self,
        member_id: &MemberId,
        limit: usize,
    ) -> Result<Vec<SavingsTransaction>, RepositoryError> {
        let guard = self.entries.lock().expect("ledger mutex poisoned");
        Ok(guard
            .iter()
            .rev()
            .filter(|entry| &entry.member_id == member_id)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct MemoryLoans {
    pub(crate) records: Arc<Mutex<HashMap<LoanId, LoanApplication>>>,
}

impl MemoryLoans {
    pub(crate) fn with(loans: impl IntoIterator<Item = LoanApplication>) -> Self {
        let store = Self::default();
        {
            let mut guard = store.records.lock().expect("loan mutex poisoned");
            for loan in loans {
                guard.insert(loan.loan_id.clone(), loan);
            }
        }
        store
    }

    pub(crate) fn len(&self) -> usize {
        self.records.lock().expect("loan mutex poisoned").len()
    }
}

impl LoanRepository for MemoryLoans {
    fn insert(&self, loan: LoanApplication) -> Result<LoanApplication, RepositoryError> {
        let mut guard = self.records.lock().expect("loan mutex poisoned");
        if guard.contains_key(&loan.loan_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(loan.loan_id.clone(), loan.clone());
        Ok(loan)
    }

    fn update(&self, loan: LoanApplication) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("loan mutex poisoned");
        guard.insert(loan.loan_id.clone(), loan);
        Ok(())
    }

    fn fetch(&self, id: &LoanId) -> Result<Option<LoanApplication>, RepositoryError> {
        let guard = self.records.lock().expect("loan mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn for_member(&self, member_id: &MemberId) -> Result<Vec<LoanApplication>, RepositoryError> {
        let guard = self.records.lock().expect("loan mutex poisoned");
        Ok(guard
            .values()
            .filter(|loan| &loan.member_id == member_id)
            .cloned()
            .collect())
    }
}

/// Loan store that is reachable for reads but rejects every write.
pub(crate) struct ReadOnlyLoans;

impl LoanRepository for ReadOnlyLoans {
    fn insert(&self, _loan: LoanApplication) -> Result<LoanApplication, RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn update(&self, _loan: LoanApplication) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &LoanId) -> Result<Option<LoanApplication>, RepositoryError> {
        Ok(None)
    }

    fn for_member(&self, _member_id: &MemberId) -> Result<Vec<LoanApplication>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(crate) struct UnavailableLedger;

impl TransactionLedger for UnavailableLedger {
    fn append(
        &self,
        _transaction: SavingsTransaction,
    ) -> Result<SavingsTransaction, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn set_status(
        &self,
        _id: &TransactionId,
        _status: TransactionStatus,
    ) -> Result<SavingsTransaction, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(
        &self,
        _member_id: &MemberId,
        _limit: usize,
    ) -> Result<Vec<SavingsTransaction>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
