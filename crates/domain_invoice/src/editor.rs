//! Invoice Editor
//!
//! Holds the edit state for one invoice and dispatches save/delete to the
//! caller's collaborators.
//!
//! # Concurrency
//!
//! Every method takes `&self`; state lives behind a mutex that is never held
//! across an await. A save snapshots the draft, sets the in-flight flag and
//! then awaits the update collaborator. While the flag is set:
//!
//! - further saves return [`SaveOutcome::InFlight`] without calling out
//! - draft mutations and cancel fail with [`InvoiceError::SaveInFlight`]
//!
//! The flag is cleared by a drop guard, so it is reset on success, failure,
//! and when the save future is dropped before completing.

use rust_decimal::Decimal;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

use core_kernel::PortError;

use crate::draft::{DraftUpdate, InvoiceDraft};
use crate::error::InvoiceError;
use crate::invoice::Invoice;
use crate::ledger::compute_total;
use crate::line_item::LineItemUpdate;
use crate::ports::{CloseHandler, InvoiceDeletePort, InvoiceUpdatePort};

/// Whether the editor is showing or editing the invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Viewing,
    Editing,
}

/// Result of a save request
#[derive(Debug)]
pub enum SaveOutcome {
    /// The collaborator accepted the draft; the editor is back in view mode
    Saved,
    /// The collaborator failed; the draft is kept so the user can retry
    Failed(PortError),
    /// Another save is still running; nothing was sent
    InFlight,
    /// Not editing, or no update collaborator was supplied
    Skipped,
}

impl SaveOutcome {
    /// Returns true if the draft was committed
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved)
    }
}

/// Point-in-time copy of the editor state for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSnapshot {
    pub mode: EditMode,
    pub draft: Option<InvoiceDraft>,
    pub is_saving: bool,
    /// Ledger total while editing, the stored invoice total otherwise
    pub total: Decimal,
}

#[derive(Debug, Default)]
struct EditorState {
    draft: Option<InvoiceDraft>,
    saving: bool,
}

fn lock(state: &Mutex<EditorState>) -> MutexGuard<'_, EditorState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the in-flight flag when dropped
struct SavingGuard<'a> {
    state: &'a Mutex<EditorState>,
}

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).saving = false;
    }
}

/// Draft editing and action dispatch for a single invoice
pub struct InvoiceEditor {
    invoice: Invoice,
    updater: Option<Arc<dyn InvoiceUpdatePort>>,
    deleter: Arc<dyn InvoiceDeletePort>,
    closer: Arc<dyn CloseHandler>,
    state: Mutex<EditorState>,
}

impl InvoiceEditor {
    /// Creates an editor in view mode
    ///
    /// Saving stays unavailable until an update collaborator is attached
    /// with [`InvoiceEditor::with_updater`].
    pub fn new(
        invoice: Invoice,
        deleter: Arc<dyn InvoiceDeletePort>,
        closer: Arc<dyn CloseHandler>,
    ) -> Self {
        Self {
            invoice,
            updater: None,
            deleter,
            closer,
            state: Mutex::new(EditorState::default()),
        }
    }

    /// Attaches the update collaborator
    pub fn with_updater(mut self, updater: Arc<dyn InvoiceUpdatePort>) -> Self {
        self.updater = Some(updater);
        self
    }

    /// Returns the invoice as supplied by the caller
    pub fn invoice(&self) -> &Invoice {
        &self.invoice
    }

    /// Returns true if an update collaborator is attached
    pub fn can_save(&self) -> bool {
        self.updater.is_some()
    }

    fn state(&self) -> MutexGuard<'_, EditorState> {
        lock(&self.state)
    }

    /// Returns the current mode
    pub fn mode(&self) -> EditMode {
        if self.state().draft.is_some() {
            EditMode::Editing
        } else {
            EditMode::Viewing
        }
    }

    /// Returns true while a draft exists
    pub fn is_editing(&self) -> bool {
        self.mode() == EditMode::Editing
    }

    /// Returns true while a save is in flight
    pub fn is_saving(&self) -> bool {
        self.state().saving
    }

    /// Returns a copy of the current draft
    pub fn draft(&self) -> Option<InvoiceDraft> {
        self.state().draft.clone()
    }

    /// Captures mode, draft, saving flag and total under one lock
    pub fn snapshot(&self) -> EditorSnapshot {
        let state = self.state();
        EditorSnapshot {
            mode: if state.draft.is_some() {
                EditMode::Editing
            } else {
                EditMode::Viewing
            },
            draft: state.draft.clone(),
            is_saving: state.saving,
            total: compute_total(
                state.draft.as_ref().map(|draft| &draft.line_items),
                self.invoice.total,
            ),
        }
    }

    /// Returns the total to display
    ///
    /// While editing this is the ledger sum, which is zero for an invoice
    /// without line items even if its stored total is not.
    pub fn computed_total(&self) -> Decimal {
        let state = self.state();
        compute_total(
            state.draft.as_ref().map(|draft| &draft.line_items),
            self.invoice.total,
        )
    }

    // ========================================================================
    // Draft Store
    // ========================================================================

    /// Enters edit mode with a fresh draft copied from the invoice
    ///
    /// Calling this while already editing discards the current draft.
    pub fn begin_edit(&self) -> Result<(), InvoiceError> {
        let mut state = self.state();
        if state.saving {
            return Err(self.save_in_flight());
        }
        state.draft = Some(InvoiceDraft::from_invoice(&self.invoice));
        info!(invoice_id = %self.invoice.invoice_id, "Editing invoice");
        Ok(())
    }

    /// Discards the draft and returns to view mode
    pub fn cancel_edit(&self) -> Result<(), InvoiceError> {
        let mut state = self.state();
        if state.draft.is_none() {
            return Ok(());
        }
        if state.saving {
            return Err(self.save_in_flight());
        }
        state.draft = None;
        debug!(invoice_id = %self.invoice.invoice_id, "Edit cancelled");
        Ok(())
    }

    /// Sets one of the draft's date, notes or reference fields
    pub fn update_field(&self, update: DraftUpdate) -> Result<(), InvoiceError> {
        self.with_draft(|draft| {
            draft.apply(update);
            Ok(())
        })
    }

    // ========================================================================
    // Line-Item Ledger
    // ========================================================================

    /// Appends a blank line item to the draft
    pub fn add_item(&self) -> Result<(), InvoiceError> {
        self.with_draft(|draft| {
            let index = draft.line_items.push_blank();
            debug!(index, "Line item added");
            Ok(())
        })
    }

    /// Updates one field of the line item at `index`
    ///
    /// # Errors
    ///
    /// `InvoiceError::LineItemOutOfRange` when editing and `index` does not
    /// address an item; `InvoiceError::SaveInFlight` while saving.
    pub fn update_item(&self, index: usize, update: LineItemUpdate) -> Result<(), InvoiceError> {
        self.with_draft(|draft| draft.line_items.update(index, update))
    }

    /// Removes the line item at `index`; out-of-range positions are ignored
    pub fn remove_item(&self, index: usize) -> Result<(), InvoiceError> {
        self.with_draft(|draft| {
            if draft.line_items.remove(index).is_none() {
                debug!(index, len = draft.line_items.len(), "No line item to remove");
            }
            Ok(())
        })
    }

    /// Runs a draft mutation, a no-op in view mode
    fn with_draft(
        &self,
        op: impl FnOnce(&mut InvoiceDraft) -> Result<(), InvoiceError>,
    ) -> Result<(), InvoiceError> {
        let mut state = self.state();
        let saving = state.saving;
        let Some(draft) = state.draft.as_mut() else {
            debug!(invoice_id = %self.invoice.invoice_id, "Not editing; change ignored");
            return Ok(());
        };
        if saving {
            return Err(self.save_in_flight());
        }
        op(draft)
    }

    fn save_in_flight(&self) -> InvoiceError {
        InvoiceError::SaveInFlight(self.invoice.invoice_id.to_string())
    }

    // ========================================================================
    // Action Dispatcher
    // ========================================================================

    /// Sends the draft to the update collaborator
    ///
    /// Failures are logged and returned in the outcome, never raised; the
    /// editor stays in edit mode with the draft intact.
    pub async fn save(&self) -> SaveOutcome {
        let Some(updater) = self.updater.clone() else {
            debug!(invoice_id = %self.invoice.invoice_id, "No update collaborator; save skipped");
            return SaveOutcome::Skipped;
        };

        let draft = {
            let mut state = self.state();
            if state.saving {
                warn!(invoice_id = %self.invoice.invoice_id, "Save already in flight");
                return SaveOutcome::InFlight;
            }
            let Some(draft) = state.draft.clone() else {
                return SaveOutcome::Skipped;
            };
            state.saving = true;
            draft
        };
        let guard = SavingGuard { state: &self.state };

        let invoice_id = &self.invoice.invoice_id;
        info!(
            invoice_id = %invoice_id,
            line_items = draft.line_items.len(),
            "Saving invoice"
        );

        let outcome = match updater.update_invoice(invoice_id, draft).await {
            Ok(()) => {
                self.state().draft = None;
                info!(invoice_id = %invoice_id, "Invoice updated");
                SaveOutcome::Saved
            }
            Err(err) => {
                error!(
                    invoice_id = %invoice_id,
                    error = %err,
                    transient = err.is_transient(),
                    "Error updating invoice"
                );
                SaveOutcome::Failed(err)
            }
        };

        drop(guard);
        outcome
    }

    /// Deletes the invoice, then asks the dialog to close
    ///
    /// # Errors
    ///
    /// The delete collaborator's error is returned as-is and the dialog
    /// stays open.
    pub async fn delete(&self) -> Result<(), PortError> {
        let invoice_id = &self.invoice.invoice_id;
        info!(invoice_id = %invoice_id, "Deleting invoice");

        self.deleter.delete_invoice(invoice_id).await?;

        info!(invoice_id = %invoice_id, "Invoice deleted");
        self.closer.close();
        Ok(())
    }

    /// Discards any draft and asks the dialog to close
    pub fn close(&self) {
        self.state().draft = None;
        self.closer.close();
    }
}
