//! Line items and their field updates
//!
//! A line item's amount is always derived as quantity × rate and never
//! stored. Field edits arrive as a closed set of [`LineItemUpdate`] variants;
//! raw text from an input control is turned into one with
//! [`LineItemUpdate::from_input`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use core_kernel::{ItemId, LineItemId};

/// Past this many powers of ten every non-zero mantissa over- or underflows
const MAX_EXPONENT: u32 = 64;

/// A line item on an invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalogue item, if the line references one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    /// Description
    pub description: String,
    /// Quantity
    pub quantity: Decimal,
    /// Unit rate in the invoice currency
    pub rate: Decimal,
    /// Backend identifier of the line itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_item_id: Option<LineItemId>,
}

impl LineItem {
    /// Creates a line item that references no catalogue item
    pub fn new(description: impl Into<String>, quantity: Decimal, rate: Decimal) -> Self {
        Self {
            item_id: None,
            description: description.into(),
            quantity,
            rate,
            line_item_id: None,
        }
    }

    /// The record appended by "add item": empty description, one unit, zero rate
    pub fn blank() -> Self {
        Self::new("", dec!(1), dec!(0))
    }

    /// Calculates quantity × rate
    ///
    /// Saturates at `Decimal::MAX` / `Decimal::MIN` when the product does
    /// not fit.
    pub fn amount(&self) -> Decimal {
        self.quantity.checked_mul(self.rate).unwrap_or_else(|| {
            saturated(self.quantity.is_sign_negative() != self.rate.is_sign_negative())
        })
    }

    /// Returns a copy with one field replaced
    pub fn with_update(&self, update: LineItemUpdate) -> Self {
        let mut item = self.clone();
        match update {
            LineItemUpdate::Description(description) => item.description = description,
            LineItemUpdate::Quantity(quantity) => item.quantity = quantity,
            LineItemUpdate::Rate(rate) => item.rate = rate,
        }
        item
    }
}

/// The bound an overflowing calculation is clamped to
pub(crate) fn saturated(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// Editable line item fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemField {
    Description,
    Quantity,
    Rate,
}

/// A single-field edit to a line item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineItemUpdate {
    Description(String),
    Quantity(Decimal),
    Rate(Decimal),
}

impl LineItemUpdate {
    /// Builds an update from raw input text
    ///
    /// Descriptions are taken verbatim. Quantities and rates go through
    /// [`coerce_amount`], so unparseable input becomes zero instead of an
    /// error.
    pub fn from_input(field: LineItemField, raw: &str) -> Self {
        match field {
            LineItemField::Description => LineItemUpdate::Description(raw.to_string()),
            LineItemField::Quantity => LineItemUpdate::Quantity(coerce_amount(raw)),
            LineItemField::Rate => LineItemUpdate::Rate(coerce_amount(raw)),
        }
    }

    /// Returns the field this update targets
    pub fn field(&self) -> LineItemField {
        match self {
            LineItemUpdate::Description(_) => LineItemField::Description,
            LineItemUpdate::Quantity(_) => LineItemField::Quantity,
            LineItemUpdate::Rate(_) => LineItemField::Rate,
        }
    }
}

/// Parses the leading number of `raw`, falling back to zero
///
/// Leading whitespace is skipped, then an optional sign, digits, an optional
/// fraction and an optional exponent are read; anything after that is
/// ignored ("12kg" reads as 12). Empty input, input without a leading number,
/// and numbers outside the decimal range all coerce to zero.
pub fn coerce_amount(raw: &str) -> Decimal {
    parse_leading_number(raw.trim_start())
        .filter(|value| !value.is_zero())
        .unwrap_or(Decimal::ZERO)
}

fn parse_leading_number(s: &str) -> Option<Decimal> {
    let bytes = s.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = &s[int_start..pos];

    let mut frac_digits = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        frac_digits = &s[frac_start..frac_end];
        pos = frac_end;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let mut exponent = None;
    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        let mut exp_end = pos + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            exponent = Some(&s[pos + 1..exp_end]);
        }
    }

    let mantissa = format!(
        "{}{}.{}",
        if negative { "-" } else { "" },
        if int_digits.is_empty() { "0" } else { int_digits },
        if frac_digits.is_empty() { "0" } else { frac_digits },
    );

    let value = Decimal::from_str(&mantissa).ok()?;
    match exponent {
        Some(exp) => scale_by_power_of_ten(value, exp),
        None => Some(value),
    }
}

/// Applies a decimal exponent, `None` when the result leaves the decimal range
fn scale_by_power_of_ten(mut value: Decimal, exponent: &str) -> Option<Decimal> {
    let (negative, digits) = match exponent.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, exponent.trim_start_matches('+')),
    };
    let magnitude = digits.parse::<u32>().unwrap_or(u32::MAX).min(MAX_EXPONENT);

    for _ in 0..magnitude {
        if negative {
            value = value.checked_div(Decimal::TEN)?;
            if value.is_zero() {
                break;
            }
        } else {
            value = value.checked_mul(Decimal::TEN)?;
        }
    }
    Some(value)
}
