//! Property-Based Test Generators
//!
//! Proptest strategies for line items, ledgers and raw input text.

use domain_invoice::{Ledger, LineItem};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for non-negative quantities with up to two decimals
pub fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for non-negative rates with up to four decimals
pub fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|n| Decimal::new(n, 4))
}

/// Strategy for line items without backend ids
pub fn line_item_strategy() -> impl Strategy<Value = LineItem> {
    ("[A-Za-z0-9 ]{0,24}", quantity_strategy(), rate_strategy())
        .prop_map(|(description, quantity, rate)| LineItem::new(description, quantity, rate))
}

/// Strategy for ledgers of up to `max_len` items
pub fn ledger_strategy(max_len: usize) -> impl Strategy<Value = Ledger> {
    prop::collection::vec(line_item_strategy(), 0..=max_len).prop_map(Ledger::from)
}

/// Strategy for text a user might type into a numeric field
pub fn numeric_input_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,6}",
        "[0-9]{1,4}\\.[0-9]{1,4}",
        "-?[0-9]{0,3}\\.?[0-9]{0,3}[a-z]{0,3}",
        "-?[0-9]e[0-9]{1,2}",
        "[0-9]{20,29}",
        "[a-z ]{0,6}",
        Just(String::new()),
    ]
}
