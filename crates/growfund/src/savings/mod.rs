//! Savings plans and the contribution ledger.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{
    PaymentReceipt, PaymentRequest, PlanConfirmation, PlanRequest, SavingsTransaction,
    TransactionId, TransactionKind, TransactionStatus,
};
pub use router::savings_router;
pub use service::{SavingsError, SavingsService, SavingsServiceError};
