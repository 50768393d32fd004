use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::members::domain::{MemberId, SavingsFrequency, SavingsPlan};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransactionId(pub String);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Savings,
    Withdrawal,
    Interest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

/// Ledger entry for a movement on a member's savings balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsTransaction {
    pub transaction_id: TransactionId,
    pub member_id: MemberId,
    pub amount: f64,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub transaction_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub description: String,
}

/// Request to start (or replace) a member's savings plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub frequency: SavingsFrequency,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfirmation {
    pub savings_plan: SavingsPlan,
    pub next_payment_date: DateTime<Utc>,
}

/// A contribution made against the active plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub amount: f64,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub transaction_ref: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub transaction: SavingsTransaction,
    pub total_saved: f64,
    pub savings_streak: u32,
    pub next_payment_date: DateTime<Utc>,
}
