//! Line-Item Ledger
//!
//! The ordered line items of a draft. Position is the only identity: updates
//! and removals address items by index even when they carry backend ids.
//!
//! A ledger always owns its items. Seeding one from an invoice copies the
//! invoice's items, so edits never reach the invoice before a save commits.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::InvoiceError;
use crate::line_item::{saturated, LineItem, LineItemUpdate};

/// Ordered sequence of line items within a draft
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    items: Vec<LineItem>,
}

impl Ledger {
    /// Creates an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger holding copies of the given items
    pub fn from_items(items: &[LineItem]) -> Self {
        Self {
            items: items.to_vec(),
        }
    }

    /// Returns the items in order
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns the item at `index`
    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    /// Returns the number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the ledger has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends a blank item (empty description, quantity 1, rate 0)
    ///
    /// Returns the position of the new item.
    pub fn push_blank(&mut self) -> usize {
        self.items.push(LineItem::blank());
        self.items.len() - 1
    }

    /// Replaces the item at `index` with a copy carrying the update
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::LineItemOutOfRange` if `index` is past the end.
    pub fn update(&mut self, index: usize, update: LineItemUpdate) -> Result<(), InvoiceError> {
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(InvoiceError::LineItemOutOfRange { index, len })?;

        debug!(index, field = ?update.field(), "Updating line item");
        *slot = slot.with_update(update);
        Ok(())
    }

    /// Removes the item at `index`
    ///
    /// Out-of-range positions leave the ledger unchanged and return `None`.
    pub fn remove(&mut self, index: usize) -> Option<LineItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Sums quantity × rate over the items, in ledger order
    ///
    /// A running sum that overflows is clamped to the bound it crossed, and
    /// later items continue from there.
    pub fn total(&self) -> Decimal {
        self.items.iter().fold(Decimal::ZERO, |sum, item| {
            let amount = item.amount();
            sum.checked_add(amount)
                .unwrap_or_else(|| saturated(amount.is_sign_negative()))
        })
    }
}

impl From<Vec<LineItem>> for Ledger {
    fn from(items: Vec<LineItem>) -> Self {
        Self { items }
    }
}

/// Derives the total shown for an invoice
///
/// With a ledger the total is its sum (zero for an empty ledger). Without
/// one, the invoice's stored total is returned unchanged.
pub fn compute_total(ledger: Option<&Ledger>, fallback: Decimal) -> Decimal {
    match ledger {
        Some(ledger) => ledger.total(),
        None => fallback,
    }
}
