//! Invoice drafts
//!
//! A draft is the uncommitted copy of an invoice's editable fields. It exists
//! only while the editor is in edit mode.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::invoice::Invoice;
use crate::ledger::Ledger;

/// Editable subset of an invoice
///
/// Serializes as the partial invoice sent to the update collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    /// Issue date, `None` once the user clears the input
    pub invoice_date: Option<NaiveDate>,
    /// Due date, `None` once the user clears the input
    pub due_date: Option<NaiveDate>,
    /// Notes
    pub notes: Option<String>,
    /// Customer-facing reference number
    pub reference_number: Option<String>,
    /// Line items being edited
    pub line_items: Ledger,
}

impl InvoiceDraft {
    /// Copies the editable fields of an invoice
    ///
    /// An invoice without line items yields an empty ledger.
    pub fn from_invoice(invoice: &Invoice) -> Self {
        Self {
            invoice_date: Some(invoice.invoice_date),
            due_date: Some(invoice.due_date),
            notes: invoice.notes.clone(),
            reference_number: invoice.reference_number.clone(),
            line_items: Ledger::from_items(invoice.line_items()),
        }
    }

    /// Applies a single field edit
    pub fn apply(&mut self, update: DraftUpdate) {
        match update {
            DraftUpdate::InvoiceDate(date) => self.invoice_date = date,
            DraftUpdate::DueDate(date) => self.due_date = date,
            DraftUpdate::Notes(notes) => self.notes = Some(notes),
            DraftUpdate::ReferenceNumber(reference) => self.reference_number = Some(reference),
        }
    }
}

/// An edit to one of the draft's non-ledger fields
///
/// Text fields are stored verbatim, including the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftUpdate {
    InvoiceDate(Option<NaiveDate>),
    DueDate(Option<NaiveDate>),
    Notes(String),
    ReferenceNumber(String),
}
