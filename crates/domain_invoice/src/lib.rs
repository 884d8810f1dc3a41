//! Invoice Domain - Draft Editing for a Single Invoice
//!
//! This crate holds the logic behind an invoice detail dialog, independent of
//! any rendering layer. A caller shows an [`Invoice`], lets the user edit a
//! subset of its fields in a [`InvoiceDraft`], and delegates persistence to
//! collaborators it supplies.
//!
//! # Components
//!
//! - **Draft Store**: [`InvoiceEditor::begin_edit`] copies the editable fields
//!   into a draft, [`InvoiceEditor::cancel_edit`] throws it away
//! - **Line-Item Ledger**: [`Ledger`] keeps the ordered line items of a draft
//! - **Total Calculator**: [`compute_total`] sums quantity × rate in ledger order
//! - **Action Dispatcher**: [`InvoiceEditor::save`] and [`InvoiceEditor::delete`]
//!   forward to the [`InvoiceUpdatePort`] and [`InvoiceDeletePort`]
//!
//! # Edit Lifecycle
//!
//! ```text
//! Viewing --begin_edit--> Editing --cancel_edit | save ok--> Viewing
//!                            |
//!                            +--save failed--> Editing (draft kept)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_invoice::{InvoiceEditor, LineItemField, LineItemUpdate};
//!
//! let editor = InvoiceEditor::new(invoice, deleter, closer).with_updater(updater);
//!
//! editor.begin_edit()?;
//! editor.add_item()?;
//! editor.update_item(0, LineItemUpdate::from_input(LineItemField::Quantity, "3"))?;
//! editor.update_item(0, LineItemUpdate::from_input(LineItemField::Rate, "12.50"))?;
//! assert_eq!(editor.computed_total(), dec!(37.50));
//!
//! editor.save().await;
//! ```

pub mod invoice;
pub mod line_item;
pub mod ledger;
pub mod draft;
pub mod editor;
pub mod ports;
pub mod adapters;
pub mod error;

pub use invoice::{Invoice, InvoiceStatus};
pub use line_item::{LineItem, LineItemField, LineItemUpdate, coerce_amount};
pub use ledger::{Ledger, compute_total};
pub use draft::{InvoiceDraft, DraftUpdate};
pub use editor::{InvoiceEditor, EditMode, EditorSnapshot, SaveOutcome};
pub use ports::{InvoiceUpdatePort, InvoiceDeletePort, CloseHandler};
pub use adapters::InMemoryInvoiceStore;
pub use error::InvoiceError;
