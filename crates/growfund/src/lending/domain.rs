use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::members::domain::MemberId;

/// Identifier wrapper for loan applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoanId(pub String);

impl fmt::Display for LoanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Loan products offered to savers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanProduct {
    Boost,
    Ascend,
}

impl LoanProduct {
    pub const fn code(self) -> &'static str {
        match self {
            LoanProduct::Boost => "boost",
            LoanProduct::Ascend => "ascend",
        }
    }
}

impl fmt::Display for LoanProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LoanProduct {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "boost" => Ok(Self::Boost),
            "ascend" => Ok(Self::Ascend),
            _ => Err(raw.to_string()),
        }
    }
}

/// Shape of the repayment schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepaymentMethod {
    OneTime,
    TwoPart,
    Installmental,
}

impl RepaymentMethod {
    pub const ALL: [RepaymentMethod; 3] = [
        RepaymentMethod::OneTime,
        RepaymentMethod::TwoPart,
        RepaymentMethod::Installmental,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            RepaymentMethod::OneTime => "one-time",
            RepaymentMethod::TwoPart => "two-part",
            RepaymentMethod::Installmental => "installmental",
        }
    }

    pub const fn installment_count(self) -> u32 {
        match self {
            RepaymentMethod::OneTime => 1,
            RepaymentMethod::TwoPart => 2,
            RepaymentMethod::Installmental => 3,
        }
    }
}

impl fmt::Display for RepaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for RepaymentMethod {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|method| method.code() == normalized)
            .ok_or_else(|| raw.to_string())
    }
}

/// Price disclosure for one repayment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeDescriptor {
    pub fee_percent: u8,
    pub effective_annual_rate: u8,
}

pub type FeeTable = BTreeMap<RepaymentMethod, FeeDescriptor>;

/// A loan product currently unlocked for a member, with its computed ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanOffer {
    pub product: LoanProduct,
    pub label: String,
    pub description: String,
    pub multiplier: f64,
    pub unlock_streak: u32,
    pub max_amount: f64,
    pub fees: FeeTable,
}

impl LoanOffer {
    pub fn fee_for(&self, method: RepaymentMethod) -> Option<&FeeDescriptor> {
        self.fees.get(&method)
    }
}

/// Lifecycle of a loan application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Pending,
    Approved,
    Disbursed,
    Active,
    Completed,
    Defaulted,
}

impl LoanStatus {
    pub const fn label(self) -> &'static str {
        match self {
            LoanStatus::Pending => "pending",
            LoanStatus::Approved => "approved",
            LoanStatus::Disbursed => "disbursed",
            LoanStatus::Active => "active",
            LoanStatus::Completed => "completed",
            LoanStatus::Defaulted => "defaulted",
        }
    }

    /// Loans the member currently owes on.
    pub const fn is_outstanding(self) -> bool {
        matches!(
            self,
            LoanStatus::Approved | LoanStatus::Disbursed | LoanStatus::Active
        )
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, LoanStatus::Completed | LoanStatus::Defaulted)
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentStatus {
    Pending,
    Paid,
    Overdue,
}

/// One scheduled repayment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub amount: f64,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub paid_date: Option<DateTime<Utc>>,
    pub status: InstallmentStatus,
}

/// Persisted loan record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub loan_id: LoanId,
    pub member_id: MemberId,
    pub product: LoanProduct,
    pub amount: f64,
    pub fee: f64,
    pub total_repayment: f64,
    pub repayment_method: RepaymentMethod,
    pub status: LoanStatus,
    pub application_date: DateTime<Utc>,
    #[serde(default)]
    pub approval_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub disbursement_date: Option<DateTime<Utc>>,
    pub due_date: DateTime<Utc>,
    pub repayments: Vec<Installment>,
}

pub fn completed_loan_count(loans: &[LoanApplication]) -> u32 {
    let completed = loans
        .iter()
        .filter(|loan| loan.status == LoanStatus::Completed)
        .count();
    u32::try_from(completed).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repayment_methods_use_wire_names() {
        let json = serde_json::to_string(&RepaymentMethod::ALL).expect("serialize");
        assert_eq!(json, r#"["one-time","two-part","installmental"]"#);
        assert_eq!(
            "Two-Part".parse::<RepaymentMethod>(),
            Ok(RepaymentMethod::TwoPart)
        );
        assert_eq!(
            "weekly".parse::<RepaymentMethod>(),
            Err("weekly".to_string())
        );
    }

    #[test]
    fn fee_table_serializes_as_method_keyed_map() {
        let mut fees = FeeTable::new();
        fees.insert(
            RepaymentMethod::OneTime,
            FeeDescriptor {
                fee_percent: 10,
                effective_annual_rate: 43,
            },
        );
        let value = serde_json::to_value(&fees).expect("serialize");
        assert_eq!(value["one-time"]["fee_percent"], 10);
        assert_eq!(value["one-time"]["effective_annual_rate"], 43);
    }

    #[test]
    fn outstanding_statuses() {
        assert!(!LoanStatus::Pending.is_outstanding());
        assert!(LoanStatus::Approved.is_outstanding());
        assert!(LoanStatus::Disbursed.is_outstanding());
        assert!(LoanStatus::Active.is_outstanding());
        assert!(!LoanStatus::Completed.is_outstanding());
        assert!(LoanStatus::Defaulted.is_terminal());
    }
}
