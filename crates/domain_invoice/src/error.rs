//! Invoice domain errors

use thiserror::Error;

/// Errors that can occur while editing an invoice
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvoiceError {
    /// A line item was addressed by a position outside the ledger
    #[error("Line item index {index} out of range (ledger has {len} items)")]
    LineItemOutOfRange {
        index: usize,
        len: usize,
    },

    /// The draft is read-only while a save is in flight
    #[error("Invoice {0} is being saved; the draft is read-only until the save completes")]
    SaveInFlight(String),
}
