use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::domain::{Invoice, InvoiceError, InvoiceRequest};
use crate::error::ErrorKind;
use crate::members::domain::MemberId;
use crate::repository::{MemberRepository, RepositoryError};

/// Issues invoices on behalf of members. Invoices are returned to the caller,
/// not stored.
pub struct InvoiceService<M> {
    members: Arc<M>,
}

impl<M> InvoiceService<M>
where
    M: MemberRepository + 'static,
{
    pub fn new(members: Arc<M>) -> Self {
        Self { members }
    }

    pub fn create(
        &self,
        member_id: &MemberId,
        request: InvoiceRequest,
        now: DateTime<Utc>,
    ) -> Result<Invoice, InvoiceServiceError> {
        let member = self
            .members
            .fetch(member_id)?
            .ok_or(RepositoryError::NotFound)?;
        let invoice = Invoice::issue(&member.profile, request, now)?;
        info!(
            member_id = %member_id,
            invoice_number = %invoice.invoice_number,
            total = invoice.total,
            "invoice issued"
        );
        Ok(invoice)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InvoiceServiceError {
    #[error(transparent)]
    Invoice(#[from] InvoiceError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl InvoiceServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InvoiceServiceError::Invoice(_) => ErrorKind::Validation,
            InvoiceServiceError::Repository(err) => ErrorKind::from(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{at, saver, MemoryMembers};
    use crate::tools::domain::InvoiceItem;

    fn request() -> InvoiceRequest {
        InvoiceRequest {
            client_name: "Ikeja Traders".to_string(),
            client_email: None,
            items: vec![InvoiceItem {
                description: "Bolts of lace".to_string(),
                quantity: 4.0,
                price: 18_000.0,
            }],
            due_date: None,
        }
    }

    #[test]
    fn create_stamps_member_profile() {
        let members = Arc::new(MemoryMembers::with([saver("mbr-7", 3, 75_000.0)]));
        let service = InvoiceService::new(members);

        let invoice = service
            .create(&MemberId("mbr-7".to_string()), request(), at(2025, 3, 3))
            .expect("issued");
        assert_eq!(invoice.total, 72_000.0);
        assert_eq!(invoice.business_name, "Amaka Fabrics");
        assert_eq!(invoice.business_email.as_deref(), Some("amaka@fabrics.ng"));
        assert_eq!(invoice.created_at, at(2025, 3, 3));
    }

    #[test]
    fn errors_classify_for_callers() {
        let service = InvoiceService::new(Arc::new(MemoryMembers::default()));
        let err = service
            .create(&MemberId("mbr-none".to_string()), request(), at(2025, 3, 3))
            .expect_err("unknown member");
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let members = Arc::new(MemoryMembers::with([saver("mbr-8", 0, 0.0)]));
        let service = InvoiceService::new(members);
        let mut empty = request();
        empty.items.clear();
        let err = service
            .create(&MemberId("mbr-8".to_string()), empty, at(2025, 3, 3))
            .expect_err("no items");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
