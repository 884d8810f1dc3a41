//! Test Data Builders
//!
//! Builder patterns for constructing invoices with sensible defaults. Tests
//! specify only the fields they care about.

use chrono::NaiveDate;
use core_kernel::{Currency, CustomerId, InvoiceId, ItemId, LineItemId};
use domain_invoice::{Invoice, InvoiceStatus, Ledger, LineItem};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::fixtures::DateFixtures;

/// Builder for constructing test invoices
pub struct InvoiceBuilder {
    invoice: Invoice,
}

impl Default for InvoiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceBuilder {
    /// Creates a builder with a unique id and default values
    pub fn new() -> Self {
        let mut invoice = Invoice::new(
            InvoiceId::new(Uuid::new_v4().to_string()),
            "INV-00042",
            "Wayne Enterprises",
            dec!(0),
            DateFixtures::invoice_date(),
            DateFixtures::due_date(),
        );
        invoice.customer_id = Some(CustomerId::new("cust-7"));
        Self { invoice }
    }

    /// Sets the invoice ID
    pub fn with_id(mut self, id: impl Into<InvoiceId>) -> Self {
        self.invoice.invoice_id = id.into();
        self
    }

    /// Sets the invoice number
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.invoice.invoice_number = number.into();
        self
    }

    /// Sets the customer name
    pub fn with_customer_name(mut self, name: impl Into<String>) -> Self {
        self.invoice.customer_name = name.into();
        self
    }

    /// Sets the stored total
    pub fn with_total(mut self, total: Decimal) -> Self {
        self.invoice.total = total;
        self
    }

    /// Sets the currency
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.invoice.currency = currency;
        self
    }

    /// Sets the status
    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
        self.invoice.status = status;
        self
    }

    /// Sets the issue and due dates
    pub fn with_dates(mut self, invoice_date: NaiveDate, due_date: NaiveDate) -> Self {
        self.invoice.invoice_date = invoice_date;
        self.invoice.due_date = due_date;
        self
    }

    /// Sets the notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.invoice.notes = Some(notes.into());
        self
    }

    /// Sets the reference number
    pub fn with_reference_number(mut self, reference: impl Into<String>) -> Self {
        self.invoice.reference_number = Some(reference.into());
        self
    }

    /// Sets the line items
    pub fn with_line_items(mut self, items: Vec<LineItem>) -> Self {
        self.invoice.line_items = Some(items);
        self
    }

    /// Sets the line items and makes the stored total match them
    pub fn with_matching_line_items(self, items: Vec<LineItem>) -> Self {
        let total = Ledger::from(items.clone()).total();
        self.with_line_items(items).with_total(total)
    }

    /// Builds the invoice
    pub fn build(self) -> Invoice {
        self.invoice
    }
}

/// Builder for constructing test line items
pub struct LineItemBuilder {
    item: LineItem,
}

impl Default for LineItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineItemBuilder {
    /// Creates a builder for a single unit at 10.00
    pub fn new() -> Self {
        Self {
            item: LineItem::new("Service", dec!(1), dec!(10.00)),
        }
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.item.description = description.into();
        self
    }

    /// Sets the quantity
    pub fn with_quantity(mut self, quantity: Decimal) -> Self {
        self.item.quantity = quantity;
        self
    }

    /// Sets the rate
    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.item.rate = rate;
        self
    }

    /// Gives the item backend identifiers
    pub fn with_ids(mut self, item_id: impl Into<ItemId>, line_item_id: impl Into<LineItemId>) -> Self {
        self.item.item_id = Some(item_id.into());
        self.item.line_item_id = Some(line_item_id.into());
        self
    }

    /// Builds the line item
    pub fn build(self) -> LineItem {
        self.item
    }
}
