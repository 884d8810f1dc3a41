//! In-memory invoice store

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{DomainPort, InvoiceId, PortError};

use crate::draft::InvoiceDraft;
use crate::invoice::Invoice;
use crate::ports::{InvoiceDeletePort, InvoiceUpdatePort};

/// Invoice store backed by a map, implementing both update and delete
#[derive(Debug, Default)]
pub struct InMemoryInvoiceStore {
    invoices: RwLock<HashMap<InvoiceId, Invoice>>,
}

impl InMemoryInvoiceStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given invoices
    pub fn with_invoices(invoices: impl IntoIterator<Item = Invoice>) -> Self {
        let invoices = invoices
            .into_iter()
            .map(|invoice| (invoice.invoice_id.clone(), invoice))
            .collect();
        Self {
            invoices: RwLock::new(invoices),
        }
    }

    /// Inserts or replaces an invoice
    pub async fn insert(&self, invoice: Invoice) {
        self.invoices
            .write()
            .await
            .insert(invoice.invoice_id.clone(), invoice);
    }

    /// Returns a copy of the stored invoice
    pub async fn get(&self, id: &InvoiceId) -> Option<Invoice> {
        self.invoices.read().await.get(id).cloned()
    }

    /// Returns the number of stored invoices
    pub async fn len(&self) -> usize {
        self.invoices.read().await.len()
    }

    /// Returns true if no invoices are stored
    pub async fn is_empty(&self) -> bool {
        self.invoices.read().await.is_empty()
    }
}

impl DomainPort for InMemoryInvoiceStore {}

#[async_trait]
impl InvoiceUpdatePort for InMemoryInvoiceStore {
    async fn update_invoice(&self, id: &InvoiceId, draft: InvoiceDraft) -> Result<(), PortError> {
        let mut invoices = self.invoices.write().await;
        let invoice = invoices
            .get_mut(id)
            .ok_or_else(|| PortError::not_found("Invoice", id))?;

        if let (Some(invoice_date), Some(due_date)) = (draft.invoice_date, draft.due_date) {
            if due_date < invoice_date {
                return Err(PortError::validation_field(
                    "Due date cannot be earlier than the invoice date",
                    "due_date",
                ));
            }
        }

        invoice.apply_draft(&draft);
        debug!(invoice_id = %id, total = %invoice.total, "Stored invoice updated");
        Ok(())
    }
}

#[async_trait]
impl InvoiceDeletePort for InMemoryInvoiceStore {
    async fn delete_invoice(&self, id: &InvoiceId) -> Result<(), PortError> {
        self.invoices
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| PortError::not_found("Invoice", id))
    }
}
