use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Installment, LoanOffer, LoanProduct, RepaymentMethod};
use super::schedule::{build_schedule, loan_due_date};
use crate::calendar::CalendarError;
use crate::error::ErrorKind;
use crate::money::{is_positive_amount, round_to_kobo, Naira};

/// Raw loan request as received from a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub loan_type: String,
    pub amount: f64,
    pub repayment_method: String,
}

/// Priced and scheduled loan, ready to be persisted as a pending application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub product: LoanProduct,
    pub amount: f64,
    pub repayment_method: RepaymentMethod,
    pub fee_percent: u8,
    pub effective_annual_rate: u8,
    pub fee: f64,
    pub total_repayment: f64,
    pub applied_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub schedule: Vec<Installment>,
}

/// Reasons an application is rejected before anything is stored.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApplicationError {
    #[error("requested amount must be a positive number of naira")]
    InvalidAmount { requested: f64 },
    #[error("loan '{loan_type}' is not currently available")]
    Ineligible { loan_type: String },
    #[error("requested {requested} exceeds the {limit} limit for {product}")]
    AmountExceedsLimit {
        product: LoanProduct,
        requested: Naira,
        limit: Naira,
    },
    #[error("repayment method '{method}' is not offered for {product}")]
    InvalidMethod {
        product: LoanProduct,
        method: String,
    },
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

impl ApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplicationError::InvalidAmount { .. } | ApplicationError::Calendar(_) => {
                ErrorKind::Validation
            }
            ApplicationError::Ineligible { .. } => ErrorKind::Ineligible,
            ApplicationError::AmountExceedsLimit { .. } => ErrorKind::AmountExceedsLimit,
            ApplicationError::InvalidMethod { .. } => ErrorKind::InvalidMethod,
        }
    }
}

/// Validate `request` against the member's current `offers` and price it.
///
/// Checks run in order and the first failure wins: the product must be on
/// offer, the amount must fit under that offer's ceiling, and the repayment
/// method must appear in its fee table.
pub fn submit_application(
    offers: &[LoanOffer],
    request: &LoanRequest,
    applied_at: DateTime<Utc>,
) -> Result<LoanTerms, ApplicationError> {
    if !is_positive_amount(request.amount) {
        return Err(ApplicationError::InvalidAmount {
            requested: request.amount,
        });
    }

    let offer = request
        .loan_type
        .parse::<LoanProduct>()
        .ok()
        .and_then(|product| offers.iter().find(|offer| offer.product == product))
        .ok_or_else(|| ApplicationError::Ineligible {
            loan_type: request.loan_type.clone(),
        })?;

    if request.amount > offer.max_amount {
        return Err(ApplicationError::AmountExceedsLimit {
            product: offer.product,
            requested: Naira(request.amount),
            limit: Naira(offer.max_amount),
        });
    }

    let (repayment_method, pricing) = request
        .repayment_method
        .parse::<RepaymentMethod>()
        .ok()
        .and_then(|method| offer.fee_for(method).map(|fee| (method, *fee)))
        .ok_or_else(|| ApplicationError::InvalidMethod {
            product: offer.product,
            method: request.repayment_method.clone(),
        })?;

    let fee = round_to_kobo(request.amount * f64::from(pricing.fee_percent) / 100.0);
    let total_repayment = request.amount + fee;
    let due_date = loan_due_date(applied_at)?;
    let schedule = build_schedule(repayment_method, total_repayment, applied_at)?;

    Ok(LoanTerms {
        product: offer.product,
        amount: request.amount,
        repayment_method,
        fee_percent: pricing.fee_percent,
        effective_annual_rate: pricing.effective_annual_rate,
        fee,
        total_repayment,
        applied_at,
        due_date,
        schedule,
    })
}
