use chrono::{DateTime, NaiveDate, Utc};
use growfund::lending::{LoanApplication, LoanId};
use growfund::members::{Member, MemberId};
use growfund::repository::{LoanRepository, MemberRepository, RepositoryError, TransactionLedger};
use growfund::savings::{SavingsTransaction, TransactionId, TransactionStatus};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

fn lock<'a, T>(mutex: &'a Mutex<T>, store: &str) -> Result<MutexGuard<'a, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable(format!("{store} lock poisoned")))
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryMemberRepository {
    records: Arc<Mutex<HashMap<MemberId, Member>>>,
}

impl MemberRepository for InMemoryMemberRepository {
    fn insert(&self, member: Member) -> Result<Member, RepositoryError> {
        let mut guard = lock(&self.records, "member store")?;
        if guard.contains_key(&member.member_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(member.member_id.clone(), member.clone());
        Ok(member)
    }

    fn update(&self, member: Member) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records, "member store")?;
        if guard.contains_key(&member.member_id) {
            guard.insert(member.member_id.clone(), member);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &MemberId) -> Result<Option<Member>, RepositoryError> {
        let guard = lock(&self.records, "member store")?;
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryTransactionLedger {
    entries: Arc<Mutex<Vec<SavingsTransaction>>>,
}

impl TransactionLedger for InMemoryTransactionLedger {
    fn append(
        &self,
        transaction: SavingsTransaction,
    ) -> Result<SavingsTransaction, RepositoryError> {
        let mut guard = lock(&self.entries, "transaction ledger")?;
        if guard
            .iter()
            .any(|entry| entry.transaction_id == transaction.transaction_id)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.push(transaction.clone());
        Ok(transaction)
    }

    fn set_status(
        &self,
        id: &TransactionId,
        status: TransactionStatus,
    ) -> Result<SavingsTransaction, RepositoryError> {
        let mut guard = lock(&self.entries, "transaction ledger")?;
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
        let guard = lock(&self.entries, "transaction ledger")?;
        let mut entries: Vec<SavingsTransaction> = guard
            .iter()
            .filter(|entry| &entry.member_id == member_id)
            .cloned()
            .collect();
        // Latest append wins ties on created_at.
        entries.reverse();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries.truncate(limit);
        Ok(entries)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryLoanRepository {
    records: Arc<Mutex<HashMap<LoanId, LoanApplication>>>,
}

impl LoanRepository for InMemoryLoanRepository {
    fn insert(&self, loan: LoanApplication) -> Result<LoanApplication, RepositoryError> {
        let mut guard = lock(&self.records, "loan store")?;
        if guard.contains_key(&loan.loan_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(loan.loan_id.clone(), loan.clone());
        Ok(loan)
    }

    fn update(&self, loan: LoanApplication) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records, "loan store")?;
        if guard.contains_key(&loan.loan_id) {
            guard.insert(loan.loan_id.clone(), loan);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &LoanId) -> Result<Option<LoanApplication>, RepositoryError> {
        let guard = lock(&self.records, "loan store")?;
        Ok(guard.get(id).cloned())
    }

    fn for_member(&self, member_id: &MemberId) -> Result<Vec<LoanApplication>, RepositoryError> {
        let guard = lock(&self.records, "loan store")?;
        Ok(guard
            .values()
            .filter(|loan| &loan.member_id == member_id)
            .cloned()
            .collect())
    }
}

/// `YYYY-MM-DD` as midnight UTC.
pub(crate) fn parse_date(raw: &str) -> Result<DateTime<Utc>, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
        .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc())
}
