//! View snapshots
//!
//! Plain data describing what the modal shows. A rendering layer draws these
//! as it sees fit; `Display` gives a text rendering used by the console.

use std::fmt;

use domain_invoice::{EditMode, EditorSnapshot, Invoice, InvoiceDraft, LineItem};

use crate::config::ModalConfig;

/// Message shown in the editor when the ledger is empty
pub const EMPTY_LEDGER_MESSAGE: &str = "No line items. Add one to proceed.";

/// Buttons in the modal footer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    Edit,
    Close,
    Delete,
    AddItem,
    Save,
    Cancel,
}

/// A footer button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub action: ModalAction,
    pub label: &'static str,
    pub enabled: bool,
}

impl ActionButton {
    fn enabled(action: ModalAction, label: &'static str) -> Self {
        Self {
            action,
            label,
            enabled: true,
        }
    }
}

/// A read-only line item row: `qty × $rate = $amount`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemRow {
    pub description: String,
    pub quantity: String,
    pub rate: String,
    pub amount: String,
}

/// An editable line item row, addressed by position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableLineItemRow {
    pub index: usize,
    pub description: String,
    pub quantity: String,
    pub rate: String,
    pub amount: String,
}

/// The "Invoice Details" screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsView {
    pub invoice_number: String,
    pub customer_name: String,
    pub amount: String,
    pub invoice_date: String,
    pub due_date: String,
    pub status: String,
    /// Empty when the invoice has no line items; the section is hidden
    pub line_items: Vec<LineItemRow>,
    /// Hidden when `None`
    pub notes: Option<String>,
}

/// The "Edit Invoice" screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    pub invoice_number: String,
    pub customer_name: String,
    pub line_items: Vec<EditableLineItemRow>,
    pub empty_ledger_message: Option<&'static str>,
    pub total_amount: String,
    /// ISO date or empty, as an `<input type="date">` expects
    pub invoice_date: String,
    pub due_date: String,
    pub reference_number: String,
    pub notes: String,
    pub status: String,
}

/// Screen content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalBody {
    Details(DetailsView),
    Editor(EditorView),
}

/// Everything the modal shows at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub title: &'static str,
    pub body: ModalBody,
    pub actions: Vec<ActionButton>,
}

impl ModalView {
    /// Builds the view for an editor snapshot
    pub fn build(invoice: &Invoice, snapshot: &EditorSnapshot, config: &ModalConfig) -> Self {
        match (&snapshot.mode, &snapshot.draft) {
            (EditMode::Editing, Some(draft)) => Self::editor(invoice, draft, snapshot),
            _ => Self::details(invoice, config),
        }
    }

    fn details(invoice: &Invoice, config: &ModalConfig) -> Self {
        let line_items = invoice
            .line_items()
            .iter()
            .map(|item| LineItemRow {
                description: item.description.clone(),
                quantity: item.quantity.normalize().to_string(),
                rate: invoice.money(item.rate).to_string(),
                amount: invoice.money(item.amount()).to_string(),
            })
            .collect();

        Self {
            title: "Invoice Details",
            body: ModalBody::Details(DetailsView {
                invoice_number: invoice.invoice_number.clone(),
                customer_name: invoice.customer_name.clone(),
                amount: invoice.total_money().to_string(),
                invoice_date: config.format_date(invoice.invoice_date),
                due_date: config.format_date(invoice.due_date),
                status: invoice.status.label().to_string(),
                line_items,
                notes: invoice.notes.clone().filter(|notes| !notes.is_empty()),
            }),
            actions: vec![
                ActionButton::enabled(ModalAction::Edit, "Edit"),
                ActionButton::enabled(ModalAction::Close, "Close"),
                ActionButton::enabled(ModalAction::Delete, "Delete"),
            ],
        }
    }

    fn editor(
        invoice: &Invoice,
        draft: &InvoiceDraft,
        snapshot: &EditorSnapshot,
    ) -> Self {
        let line_items: Vec<_> = draft
            .line_items
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| editable_row(invoice, index, item))
            .collect();

        let save = if snapshot.is_saving {
            ActionButton {
                action: ModalAction::Save,
                label: "Saving...",
                enabled: false,
            }
        } else {
            ActionButton::enabled(ModalAction::Save, "Save")
        };

        Self {
            title: "Edit Invoice",
            body: ModalBody::Editor(EditorView {
                invoice_number: invoice.invoice_number.clone(),
                customer_name: invoice.customer_name.clone(),
                empty_ledger_message: line_items.is_empty().then_some(EMPTY_LEDGER_MESSAGE),
                line_items,
                total_amount: invoice.money(snapshot.total).to_string(),
                invoice_date: iso_or_empty(draft.invoice_date),
                due_date: iso_or_empty(draft.due_date),
                reference_number: draft.reference_number.clone().unwrap_or_default(),
                notes: draft.notes.clone().unwrap_or_default(),
                status: invoice.status.label().to_string(),
            }),
            actions: vec![
                ActionButton::enabled(ModalAction::AddItem, "Add Item"),
                save,
                ActionButton::enabled(ModalAction::Cancel, "Cancel"),
            ],
        }
    }

    /// Returns the footer button for an action, if shown
    pub fn action(&self, action: ModalAction) -> Option<&ActionButton> {
        self.actions.iter().find(|button| button.action == action)
    }
}

fn editable_row(invoice: &Invoice, index: usize, item: &LineItem) -> EditableLineItemRow {
    EditableLineItemRow {
        index,
        description: item.description.clone(),
        quantity: item.quantity.to_string(),
        rate: item.rate.to_string(),
        amount: invoice.money(item.amount()).to_string(),
    }
}

fn iso_or_empty(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

impl fmt::Display for ModalView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        match &self.body {
            ModalBody::Details(view) => {
                writeln!(f, "Invoice #:    {}", view.invoice_number)?;
                writeln!(f, "Customer:     {}", view.customer_name)?;
                writeln!(f, "Amount:       {}", view.amount)?;
                writeln!(f, "Invoice Date: {}", view.invoice_date)?;
                writeln!(f, "Due Date:     {}", view.due_date)?;
                writeln!(f, "Status:       {}", view.status)?;
                if !view.line_items.is_empty() {
                    writeln!(f, "Line Items:")?;
                    for row in &view.line_items {
                        writeln!(f, "  {}", row.description)?;
                        writeln!(f, "    {} × {} = {}", row.quantity, row.rate, row.amount)?;
                    }
                }
                if let Some(notes) = &view.notes {
                    writeln!(f, "Notes:        {notes}")?;
                }
            }
            ModalBody::Editor(view) => {
                writeln!(f, "Invoice #:    {}", view.invoice_number)?;
                writeln!(f, "Customer:     {}", view.customer_name)?;
                writeln!(f, "Line Items:")?;
                if let Some(message) = view.empty_ledger_message {
                    writeln!(f, "  {message}")?;
                }
                for row in &view.line_items {
                    writeln!(
                        f,
                        "  [{}] {:?} qty={} rate={} total={}",
                        row.index, row.description, row.quantity, row.rate, row.amount
                    )?;
                }
                writeln!(f, "Total Amount: {}", view.total_amount)?;
                writeln!(f, "Invoice Date: {}", view.invoice_date)?;
                writeln!(f, "Due Date:     {}", view.due_date)?;
                writeln!(f, "Reference:    {}", view.reference_number)?;
                writeln!(f, "Notes:        {}", view.notes)?;
                writeln!(f, "Status:       {}", view.status)?;
            }
        }

        let buttons: Vec<String> = self
            .actions
            .iter()
            .map(|button| {
                if button.enabled {
                    format!("[{}]", button.label)
                } else {
                    format!("({})", button.label)
                }
            })
            .collect();
        write!(f, "{}", buttons.join(" "))
    }
}
