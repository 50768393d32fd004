//! Business tools offered alongside savings. Currently invoicing: a member
//! issues an invoice to a client, priced from its line items and stamped with
//! the member's trading details.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{
    invoice_total, Invoice, InvoiceError, InvoiceItem, InvoiceNumber, InvoiceRequest, InvoiceStatus,
};
pub use router::invoice_router;
pub use service::{InvoiceService, InvoiceServiceError};
