//! Invoice model
//!
//! Invoices are owned by the backend. Inside this crate they are read-only
//! input; edits happen on an [`InvoiceDraft`] and reach the invoice only
//! through the update collaborator.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, CustomerId, InvoiceId, Money};

use crate::draft::InvoiceDraft;
use crate::line_item::LineItem;

/// Invoice status as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Not yet sent to the customer
    Draft,
    /// Sent to the customer
    Sent,
    /// Opened by the customer
    Viewed,
    /// Awaiting payment
    Unpaid,
    /// Partial payment received
    PartiallyPaid,
    /// Fully paid
    Paid,
    /// Past due date
    Overdue,
    /// Voided
    Void,
    /// Any status this client does not know about
    #[serde(other)]
    Unknown,
}

impl InvoiceStatus {
    /// Returns the status as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Viewed => "viewed",
            InvoiceStatus::Unpaid => "unpaid",
            InvoiceStatus::PartiallyPaid => "partially_paid",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Void => "void",
            InvoiceStatus::Unknown => "unknown",
        }
    }

    /// Returns a capitalised label for display
    pub fn label(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Sent => "Sent",
            InvoiceStatus::Viewed => "Viewed",
            InvoiceStatus::Unpaid => "Unpaid",
            InvoiceStatus::PartiallyPaid => "Partially Paid",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Overdue => "Overdue",
            InvoiceStatus::Void => "Void",
            InvoiceStatus::Unknown => "Unknown",
        }
    }
}

/// An invoice as displayed in the detail dialog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Backend identifier
    pub invoice_id: InvoiceId,
    /// Invoice number (human-readable)
    pub invoice_number: String,
    /// Customer display name
    pub customer_name: String,
    /// Customer ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    /// Stored total amount
    pub total: Decimal,
    /// Currency of all amounts on the invoice
    #[serde(default, rename = "currency_code")]
    pub currency: Currency,
    /// Status
    pub status: InvoiceStatus,
    /// Issue date
    pub invoice_date: NaiveDate,
    /// Due date
    pub due_date: NaiveDate,
    /// Notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Customer-facing reference number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    /// Line items, absent when the backend omitted them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<LineItem>>,
}

impl Invoice {
    /// Creates an invoice without line items, notes or reference number
    pub fn new(
        invoice_id: impl Into<InvoiceId>,
        invoice_number: impl Into<String>,
        customer_name: impl Into<String>,
        total: Decimal,
        invoice_date: NaiveDate,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            invoice_id: invoice_id.into(),
            invoice_number: invoice_number.into(),
            customer_name: customer_name.into(),
            customer_id: None,
            total,
            currency: Currency::default(),
            status: InvoiceStatus::Draft,
            invoice_date,
            due_date,
            notes: None,
            reference_number: None,
            line_items: None,
        }
    }

    /// Returns the line items, empty when none were supplied
    pub fn line_items(&self) -> &[LineItem] {
        self.line_items.as_deref().unwrap_or_default()
    }

    /// Returns true if the invoice has at least one line item
    pub fn has_line_items(&self) -> bool {
        !self.line_items().is_empty()
    }

    /// Returns the stored total in the invoice currency
    pub fn total_money(&self) -> Money {
        Money::new(self.total, self.currency)
    }

    /// Wraps an amount in the invoice currency
    pub fn money(&self, amount: Decimal) -> Money {
        Money::new(amount, self.currency)
    }

    /// Commits a draft onto this invoice
    ///
    /// Dates only change when the draft carries one. The stored total is
    /// replaced by the draft's ledger total.
    pub fn apply_draft(&mut self, draft: &InvoiceDraft) {
        if let Some(date) = draft.invoice_date {
            self.invoice_date = date;
        }
        if let Some(date) = draft.due_date {
            self.due_date = date;
        }
        self.notes = draft.notes.clone();
        self.reference_number = draft.reference_number.clone();
        self.line_items = Some(draft.line_items.items().to_vec());
        self.total = draft.line_items.total();
    }
}
