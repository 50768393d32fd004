use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::members::domain::MemberProfile;
use crate::money::round_to_kobo;

/// Invoice numbers are `GF-` followed by the issue time in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvoiceNumber(pub String);

impl InvoiceNumber {
    pub fn issued_at(at: DateTime<Utc>) -> Self {
        Self(format!("GF-{}", at.timestamp_millis()))
    }
}

impl fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub description: String,
    pub quantity: f64,
    pub price: f64,
}

impl InvoiceItem {
    pub fn line_total(&self) -> f64 {
        self.quantity * self.price
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

/// Client and line items for a new invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRequest {
    pub client_name: String,
    #[serde(default)]
    pub client_email: Option<String>,
    pub items: Vec<InvoiceItem>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_number: InvoiceNumber,
    pub client_name: String,
    pub client_email: Option<String>,
    pub items: Vec<InvoiceItem>,
    pub total: f64,
    pub due_date: Option<NaiveDate>,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
    pub business_name: String,
    pub business_email: Option<String>,
    pub business_phone: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvoiceError {
    #[error("client name is required")]
    MissingClient,
    #[error("an invoice needs at least one item")]
    NoItems,
    #[error("item {position} needs a positive quantity and a non-negative price")]
    InvalidItem { position: usize },
}

/// Sum of `quantity × price` over the items, rounded to the kobo.
pub fn invoice_total(items: &[InvoiceItem]) -> f64 {
    round_to_kobo(items.iter().map(InvoiceItem::line_total).sum())
}

impl InvoiceRequest {
    fn validate(&self) -> Result<(), InvoiceError> {
        if self.client_name.trim().is_empty() {
            return Err(InvoiceError::MissingClient);
        }
        if self.items.is_empty() {
            return Err(InvoiceError::NoItems);
        }
        for (index, item) in self.items.iter().enumerate() {
            let quantity_ok = item.quantity.is_finite() && item.quantity > 0.0;
            let price_ok = item.price.is_finite() && item.price >= 0.0;
            if !quantity_ok || !price_ok {
                return Err(InvoiceError::InvalidItem {
                    position: index + 1,
                });
            }
        }
        Ok(())
    }
}

impl Invoice {
    /// Price the request and stamp it with the issuing member's details.
    pub fn issue(
        issuer: &MemberProfile,
        request: InvoiceRequest,
        now: DateTime<Utc>,
    ) -> Result<Self, InvoiceError> {
        request.validate()?;
        let total = invoice_total(&request.items);
        Ok(Self {
            invoice_number: InvoiceNumber::issued_at(now),
            client_name: request.client_name.trim().to_string(),
            client_email: request.client_email,
            items: request.items,
            total,
            due_date: request.due_date,
            status: InvoiceStatus::Pending,
            created_at: now,
            business_name: issuer.trading_name().to_string(),
            business_email: issuer.email.clone(),
            business_phone: issuer.phone.clone(),
        })
    }
}
