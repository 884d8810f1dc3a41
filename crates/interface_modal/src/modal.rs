//! Invoice detail modal
//!
//! Owns the modal's props and turns user events into editor calls.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use domain_invoice::{
    CloseHandler, DraftUpdate, Invoice, InvoiceDeletePort, InvoiceEditor, InvoiceUpdatePort,
    LineItemField, LineItemUpdate, SaveOutcome,
};

use crate::config::ModalConfig;
use crate::error::ModalError;
use crate::view::ModalView;

/// A user event raised inside the modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEvent {
    Edit,
    Cancel,
    Save,
    Delete,
    Close,
    AddLineItem,
    EditLineItem {
        index: usize,
        field: LineItemField,
        value: String,
    },
    RemoveLineItem(usize),
    /// Raw date input; empty clears the date
    SetInvoiceDate(String),
    SetDueDate(String),
    SetReferenceNumber(String),
    SetNotes(String),
}

/// Callbacks supplied by the host
#[derive(Clone)]
pub struct ModalCollaborators {
    pub updater: Option<Arc<dyn InvoiceUpdatePort>>,
    pub deleter: Arc<dyn InvoiceDeletePort>,
    pub closer: Arc<dyn CloseHandler>,
}

impl ModalCollaborators {
    pub fn new(deleter: Arc<dyn InvoiceDeletePort>, closer: Arc<dyn CloseHandler>) -> Self {
        Self {
            updater: None,
            deleter,
            closer,
        }
    }

    pub fn with_updater(mut self, updater: Arc<dyn InvoiceUpdatePort>) -> Self {
        self.updater = Some(updater);
        self
    }
}

/// The invoice detail modal
///
/// The draft lives only as long as the current editor. Replacing the invoice
/// or closing the modal through its props starts over in view mode.
pub struct InvoiceDetailModal {
    config: ModalConfig,
    collaborators: ModalCollaborators,
    is_open: bool,
    editor: Option<InvoiceEditor>,
}

impl InvoiceDetailModal {
    pub fn new(config: ModalConfig, collaborators: ModalCollaborators) -> Self {
        Self {
            config,
            collaborators,
            is_open: false,
            editor: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn invoice(&self) -> Option<&Invoice> {
        self.editor.as_ref().map(InvoiceEditor::invoice)
    }

    pub fn editor(&self) -> Option<&InvoiceEditor> {
        self.editor.as_ref()
    }

    /// Replaces the invoice prop
    pub fn set_invoice(&mut self, invoice: Option<Invoice>) {
        self.editor = invoice.map(|invoice| self.build_editor(invoice));
    }

    /// Sets the open prop; closing discards any draft
    pub fn set_open(&mut self, open: bool) {
        if self.is_open && !open {
            if let Some(invoice) = self.editor.take().map(|e| e.invoice().clone()) {
                self.editor = Some(self.build_editor(invoice));
            }
        }
        self.is_open = open;
    }

    fn build_editor(&self, invoice: Invoice) -> InvoiceEditor {
        let editor = InvoiceEditor::new(
            invoice,
            Arc::clone(&self.collaborators.deleter),
            Arc::clone(&self.collaborators.closer),
        );
        match &self.collaborators.updater {
            Some(updater) => editor.with_updater(Arc::clone(updater)),
            None => editor,
        }
    }

    fn visible_editor(&self) -> Option<&InvoiceEditor> {
        self.editor.as_ref().filter(|_| self.is_open)
    }

    /// Renders the current view, or `None` when nothing is shown
    pub fn render(&self) -> Option<ModalView> {
        let editor = self.visible_editor()?;
        Some(ModalView::build(
            editor.invoice(),
            &editor.snapshot(),
            &self.config,
        ))
    }

    /// Handles a user event
    ///
    /// Events are ignored while the modal is hidden. Save failures are
    /// logged by the editor and leave the draft in place; delete failures
    /// are returned.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed date input, edits attempted while a
    /// save is in flight, out-of-range line item edits, and delete failures.
    pub async fn handle(&self, event: ModalEvent) -> Result<(), ModalError> {
        let Some(editor) = self.visible_editor() else {
            debug!(?event, "Modal hidden; event ignored");
            return Ok(());
        };

        match event {
            ModalEvent::Edit => editor.begin_edit()?,
            ModalEvent::Cancel => editor.cancel_edit()?,
            ModalEvent::Save => match editor.save().await {
                SaveOutcome::Failed(err) => {
                    warn!(error = %err, "Save failed; draft kept for retry");
                }
                SaveOutcome::Saved | SaveOutcome::InFlight | SaveOutcome::Skipped => {}
            },
            ModalEvent::Delete => editor.delete().await?,
            ModalEvent::Close => editor.close(),
            ModalEvent::AddLineItem => editor.add_item()?,
            ModalEvent::EditLineItem {
                index,
                field,
                value,
            } => editor.update_item(index, LineItemUpdate::from_input(field, &value))?,
            ModalEvent::RemoveLineItem(index) => editor.remove_item(index)?,
            ModalEvent::SetInvoiceDate(raw) => {
                let date = parse_date_input("invoice_date", &raw)?;
                editor.update_field(DraftUpdate::InvoiceDate(date))?;
            }
            ModalEvent::SetDueDate(raw) => {
                let date = parse_date_input("due_date", &raw)?;
                editor.update_field(DraftUpdate::DueDate(date))?;
            }
            ModalEvent::SetReferenceNumber(value) => {
                editor.update_field(DraftUpdate::ReferenceNumber(value))?
            }
            ModalEvent::SetNotes(value) => editor.update_field(DraftUpdate::Notes(value))?,
        }

        Ok(())
    }
}

/// Parses a date input value; empty means cleared
pub fn parse_date_input(field: &'static str, raw: &str) -> Result<Option<NaiveDate>, ModalError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ModalError::InvalidDate {
            field,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_invoice::ports::mock::{CountingCloseHandler, RecordingDeletePort};

    #[test]
    fn test_parse_date_input() {
        assert_eq!(parse_date_input("due_date", "").unwrap(), None);
        assert_eq!(
            parse_date_input("due_date", "2024-04-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 15)
        );
        assert!(matches!(
            parse_date_input("due_date", "04/15/2024"),
            Err(ModalError::InvalidDate { field: "due_date", .. })
        ));
    }

    #[test]
    fn test_render_needs_open_and_invoice() {
        let collaborators = ModalCollaborators::new(
            Arc::new(RecordingDeletePort::new()),
            Arc::new(CountingCloseHandler::new()),
        );
        let mut modal = InvoiceDetailModal::new(ModalConfig::default(), collaborators);
        assert!(modal.render().is_none());

        modal.set_open(true);
        assert!(modal.render().is_none());
    }
}
