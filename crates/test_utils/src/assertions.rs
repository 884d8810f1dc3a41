//! Custom Test Assertions
//!
//! Assertion helpers that print the whole ledger on failure instead of a
//! bare `left != right`.

use domain_invoice::{Ledger, LineItem};
use rust_decimal::Decimal;

fn describe(items: &[LineItem]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("  [{i}] {:?} {} x {}", item.description, item.quantity, item.rate))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Asserts that a ledger totals the expected amount
///
/// # Panics
///
/// Panics with the ledger contents if the totals differ
pub fn assert_ledger_total(ledger: &Ledger, expected: Decimal) {
    let actual = ledger.total();
    assert_eq!(
        actual,
        expected,
        "Ledger total mismatch: actual={}, expected={}\n{}",
        actual,
        expected,
        describe(ledger.items())
    );
}

/// Asserts that a ledger holds exactly the given descriptions, in order
pub fn assert_descriptions(ledger: &Ledger, expected: &[&str]) {
    let actual: Vec<&str> = ledger
        .items()
        .iter()
        .map(|item| item.description.as_str())
        .collect();
    assert_eq!(
        actual,
        expected,
        "Ledger order mismatch\n{}",
        describe(ledger.items())
    );
}

/// Asserts that two amounts are equal once rounded to cents
pub fn assert_amount_eq_cents(actual: Decimal, expected: Decimal) {
    assert_eq!(
        actual.round_dp(2),
        expected.round_dp(2),
        "Amounts differ at cent precision: actual={}, expected={}",
        actual,
        expected
    );
}
