//! Pre-built Test Fixtures
//!
//! Ready-to-use invoices and line items. Values are fixed so tests can
//! assert on exact totals.

use chrono::NaiveDate;
use domain_invoice::{Invoice, InvoiceStatus, LineItem};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::builders::InvoiceBuilder;

/// Fixture for dates
pub struct DateFixtures;

impl DateFixtures {
    /// Standard issue date (Mar 1, 2024)
    pub fn invoice_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date")
    }

    /// Standard due date (Mar 31, 2024)
    pub fn due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 31).expect("valid date")
    }
}

/// Fixture for line items
pub struct LineItemFixtures;

impl LineItemFixtures {
    /// 10 hours of consulting at 120.00
    pub fn consulting() -> LineItem {
        LineItem::new("Consulting", dec!(10), dec!(120.00))
    }

    /// One month of hosting at 49.99
    pub fn hosting() -> LineItem {
        LineItem::new("Hosting", dec!(1), dec!(49.99))
    }

    /// Three licences at 15.50
    pub fn licences() -> LineItem {
        LineItem::new("Licences", dec!(3), dec!(15.50))
    }

    /// Sum of the three standard items
    pub fn standard_total() -> Decimal {
        dec!(1200.00) + dec!(49.99) + dec!(46.50)
    }
}

/// Fixture for invoices
pub struct InvoiceFixtures;

impl InvoiceFixtures {
    /// Invoice with the three standard line items and matching total
    pub fn with_items() -> Invoice {
        InvoiceBuilder::new()
            .with_line_items(vec![
                LineItemFixtures::consulting(),
                LineItemFixtures::hosting(),
                LineItemFixtures::licences(),
            ])
            .with_total(LineItemFixtures::standard_total())
            .with_notes("Payment by bank transfer")
            .with_reference_number("PO-2024-118")
            .with_status(InvoiceStatus::Sent)
            .build()
    }

    /// Invoice whose backend payload carried no line items
    pub fn without_items(total: Decimal) -> Invoice {
        InvoiceBuilder::new().with_total(total).build()
    }

    /// The 100.00 invoice used by cancel tests
    pub fn hundred() -> Invoice {
        Self::without_items(dec!(100.00))
    }
}
