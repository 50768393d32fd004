//! Storage seams. The service layer only ever talks to these traits; the
//! document store (or the in-memory adapters shipped with the API binary)
//! sits behind them.

use crate::lending::domain::{LoanApplication, LoanId};
use crate::members::domain::{Member, MemberId};
use crate::savings::domain::{SavingsTransaction, TransactionId, TransactionStatus};

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

pub trait MemberRepository: Send + Sync {
    fn insert(&self, member: Member) -> Result<Member, RepositoryError>;
    fn update(&self, member: Member) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &MemberId) -> Result<Option<Member>, RepositoryError>;
}

/// Append-only log of savings movements. Entries are never removed; only
/// their status moves from pending to completed or failed.
pub trait TransactionLedger: Send + Sync {
    fn append(&self, transaction: SavingsTransaction)
        -> Result<SavingsTransaction, RepositoryError>;
    fn set_status(
        &self,
        id: &TransactionId,
        status: TransactionStatus,
    ) -> Result<SavingsTransaction, RepositoryError>;
    /// Most recent first, at most `limit` entries.
    fn recent(
        &self,
        member_id: &MemberId,
        limit: usize,
    ) -> Result<Vec<SavingsTransaction>, RepositoryError>;
}

pub trait LoanRepository: Send + Sync {
    fn insert(&self, loan: LoanApplication) -> Result<LoanApplication, RepositoryError>;
    fn update(&self, loan: LoanApplication) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &LoanId) -> Result<Option<LoanApplication>, RepositoryError>;
    /// Every loan the member has applied for, in any order.
    fn for_member(&self, member_id: &MemberId) -> Result<Vec<LoanApplication>, RepositoryError>;
}
