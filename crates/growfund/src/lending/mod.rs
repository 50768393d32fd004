//! Microloan eligibility, pricing, repayment schedules, and the loan lifecycle.
//!
//! Pure computations (`eligibility`, `processor`, `schedule`, `lifecycle`) take
//! the reference timestamp as an argument; `service` composes them over the
//! storage traits and `router` exposes the service over HTTP.

pub mod domain;
pub mod eligibility;
pub mod lifecycle;
pub mod processor;
pub mod router;
pub mod schedule;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    completed_loan_count, FeeDescriptor, FeeTable, Installment, InstallmentStatus,
    LoanApplication, LoanId, LoanOffer, LoanProduct, LoanStatus, RepaymentMethod,
};
pub use eligibility::{available_offers, offers_for_member};
pub use lifecycle::{advance, LifecycleError};
pub use processor::{submit_application, ApplicationError, LoanRequest, LoanTerms};
pub use router::lending_router;
pub use schedule::{build_schedule, installment_due_dates, loan_due_date, LOAN_TERM_MONTHS};
pub use service::{current_score, LendingService, LendingServiceError};
