//! Tests for the invoice editor: draft lifecycle, ledger editing through the
//! editor, totals, and save/delete dispatch

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use core_kernel::InvoiceId;
use domain_invoice::ports::mock::{
    CountingCloseHandler, PendingUpdatePort, RecordingDeletePort, RecordingUpdatePort,
};
use domain_invoice::{
    DraftUpdate, EditMode, InMemoryInvoiceStore, Invoice, InvoiceEditor, InvoiceError,
    InvoiceUpdatePort, LineItem, LineItemField, LineItemUpdate, SaveOutcome,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn invoice_with_total(total: Decimal) -> Invoice {
    Invoice::new("INV-ID-1", "INV-00017", "Stark Industries", total, date(2024, 6, 1), date(2024, 6, 30))
}

fn invoice_with_items() -> Invoice {
    let mut invoice = invoice_with_total(dec!(340.00));
    invoice.line_items = Some(vec![
        LineItem::new("Consulting", dec!(2), dec!(150)),
        LineItem::new("Travel", dec!(1), dec!(40)),
    ]);
    invoice.notes = Some("Thanks for your business".to_string());
    invoice
}

struct Harness {
    editor: InvoiceEditor,
    updater: Arc<RecordingUpdatePort>,
    deleter: Arc<RecordingDeletePort>,
    closer: Arc<CountingCloseHandler>,
}

fn harness_with(invoice: Invoice, updater: RecordingUpdatePort, deleter: RecordingDeletePort) -> Harness {
    let updater = Arc::new(updater);
    let deleter = Arc::new(deleter);
    let closer = Arc::new(CountingCloseHandler::new());
    let editor = InvoiceEditor::new(invoice, deleter.clone(), closer.clone())
        .with_updater(updater.clone());
    Harness { editor, updater, deleter, closer }
}

fn harness(invoice: Invoice) -> Harness {
    harness_with(invoice, RecordingUpdatePort::new(), RecordingDeletePort::new())
}

// ============================================================================
// Draft Store
// ============================================================================

mod draft_store {
    use super::*;

    #[test]
    fn test_begin_edit_seeds_draft_from_invoice() {
        let h = harness(invoice_with_items());
        h.editor.begin_edit().unwrap();

        let draft = h.editor.draft().unwrap();
        assert_eq!(h.editor.mode(), EditMode::Editing);
        assert_eq!(draft.line_items.items(), h.editor.invoice().line_items());
        assert_eq!(draft.notes.as_deref(), Some("Thanks for your business"));
        assert_eq!(draft.invoice_date, Some(date(2024, 6, 1)));
    }

    #[test]
    fn test_cancel_leaves_invoice_unchanged() {
        let h = harness(invoice_with_total(dec!(100.00)));
        let before = h.editor.invoice().clone();

        h.editor.begin_edit().unwrap();
        h.editor.add_item().unwrap();
        h.editor
            .update_item(0, LineItemUpdate::from_input(LineItemField::Rate, "75"))
            .unwrap();
        h.editor.update_field(DraftUpdate::Notes("changed".to_string())).unwrap();
        h.editor.cancel_edit().unwrap();

        assert_eq!(h.editor.mode(), EditMode::Viewing);
        assert!(h.editor.draft().is_none());
        assert_eq!(h.editor.invoice(), &before);
        assert_eq!(h.editor.invoice().total, dec!(100.00));
        assert_eq!(h.editor.computed_total(), dec!(100.00));
    }

    #[test]
    fn test_begin_edit_again_reseeds_draft() {
        let h = harness(invoice_with_items());
        h.editor.begin_edit().unwrap();
        h.editor.remove_item(0).unwrap();
        h.editor.begin_edit().unwrap();

        assert_eq!(h.editor.draft().unwrap().line_items.len(), 2);
    }

    #[test]
    fn test_field_updates_change_only_draft() {
        let h = harness(invoice_with_items());
        h.editor.begin_edit().unwrap();
        h.editor.update_field(DraftUpdate::DueDate(Some(date(2024, 7, 15)))).unwrap();
        h.editor.update_field(DraftUpdate::ReferenceNumber("PO-77".to_string())).unwrap();
        h.editor.update_field(DraftUpdate::InvoiceDate(None)).unwrap();

        let draft = h.editor.draft().unwrap();
        assert_eq!(draft.due_date, Some(date(2024, 7, 15)));
        assert_eq!(draft.reference_number.as_deref(), Some("PO-77"));
        assert!(draft.invoice_date.is_none());
        assert_eq!(h.editor.invoice().due_date, date(2024, 6, 30));
        assert!(h.editor.invoice().reference_number.is_none());
    }
}

// ============================================================================
// Ledger through the editor
// ============================================================================

mod ledger_editing {
    use super::*;

    #[test]
    fn test_add_item_appends_blank_record() {
        let h = harness(invoice_with_items());
        h.editor.begin_edit().unwrap();
        h.editor.add_item().unwrap();

        let draft = h.editor.draft().unwrap();
        assert_eq!(draft.line_items.len(), 3);
        assert_eq!(draft.line_items.get(2), Some(&LineItem::blank()));
        assert_eq!(h.editor.computed_total(), dec!(340));
    }

    #[test]
    fn test_update_item_recomputes_total() {
        let h = harness(invoice_with_items());
        h.editor.begin_edit().unwrap();
        h.editor
            .update_item(1, LineItemUpdate::from_input(LineItemField::Quantity, "3"))
            .unwrap();

        assert_eq!(h.editor.computed_total(), dec!(300) + dec!(120));
    }

    #[test]
    fn test_non_numeric_quantity_becomes_zero() {
        let h = harness(invoice_with_items());
        h.editor.begin_edit().unwrap();
        h.editor
            .update_item(0, LineItemUpdate::from_input(LineItemField::Quantity, "abc"))
            .unwrap();

        let draft = h.editor.draft().unwrap();
        assert_eq!(draft.line_items.items()[0].quantity, Decimal::ZERO);
        assert_eq!(h.editor.computed_total(), dec!(40));
    }

    #[test]
    fn test_update_out_of_range_is_rejected() {
        let h = harness(invoice_with_items());
        h.editor.begin_edit().unwrap();

        let result = h.editor.update_item(2, LineItemUpdate::Rate(dec!(1)));
        assert_eq!(result, Err(InvoiceError::LineItemOutOfRange { index: 2, len: 2 }));
        assert_eq!(h.editor.draft().unwrap().line_items.len(), 2);
    }

    #[test]
    fn test_remove_item_out_of_range_is_ignored() {
        let h = harness(invoice_with_items());
        h.editor.begin_edit().unwrap();
        h.editor.remove_item(10).unwrap();
        assert_eq!(h.editor.draft().unwrap().line_items.len(), 2);
    }

    #[test]
    fn test_add_then_remove_restores_items() {
        let h = harness(invoice_with_items());
        h.editor.begin_edit().unwrap();
        let before = h.editor.draft().unwrap().line_items;

        h.editor.add_item().unwrap();
        h.editor.remove_item(before.len()).unwrap();

        assert_eq!(h.editor.draft().unwrap().line_items, before);
    }

    #[test]
    fn test_editing_invoice_without_items_totals_zero() {
        let h = harness(invoice_with_total(dec!(250.00)));
        assert_eq!(h.editor.computed_total(), dec!(250.00));

        h.editor.begin_edit().unwrap();

        assert!(h.editor.draft().unwrap().line_items.is_empty());
        assert_eq!(h.editor.computed_total(), dec!(0.00));
        assert_eq!(h.editor.invoice().total, dec!(250.00));
    }

    #[tokio::test]
    async fn test_huge_quantity_and_rate_clamp_total() {
        let store = Arc::new(InMemoryInvoiceStore::with_invoices([invoice_with_total(dec!(250.00))]));
        let editor = InvoiceEditor::new(
            invoice_with_total(dec!(250.00)),
            store.clone(),
            Arc::new(CountingCloseHandler::new()),
        )
        .with_updater(store.clone());

        editor.begin_edit().unwrap();
        editor.add_item().unwrap();
        editor
            .update_item(0, LineItemUpdate::from_input(LineItemField::Quantity, "1e20"))
            .unwrap();
        editor
            .update_item(0, LineItemUpdate::from_input(LineItemField::Rate, "1e20"))
            .unwrap();

        assert_eq!(editor.computed_total(), Decimal::MAX);
        assert_eq!(editor.snapshot().total, Decimal::MAX);

        assert!(editor.save().await.is_saved());
        let stored = store.get(&InvoiceId::new("INV-ID-1")).await.unwrap();
        assert_eq!(stored.total, Decimal::MAX);
    }
}

// ============================================================================
// Save
// ============================================================================

mod save {
    use super::*;

    #[tokio::test]
    async fn test_save_sends_draft_and_returns_to_view_mode() {
        let h = harness(invoice_with_items());
        h.editor.begin_edit().unwrap();
        h.editor.add_item().unwrap();
        h.editor
            .update_item(2, LineItemUpdate::Description("Materials".to_string()))
            .unwrap();
        let sent = h.editor.draft().unwrap();

        let outcome = h.editor.save().await;

        assert!(outcome.is_saved());
        assert_eq!(h.editor.mode(), EditMode::Viewing);
        assert!(!h.editor.is_saving());
        assert_eq!(h.updater.invoice_ids(), vec![InvoiceId::new("INV-ID-1")]);
        assert_eq!(h.updater.drafts(), vec![sent]);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_draft_for_retry() {
        let h = harness_with(invoice_with_items(), RecordingUpdatePort::failing(1), RecordingDeletePort::new());
        h.editor.begin_edit().unwrap();
        h.editor.remove_item(1).unwrap();

        let outcome = h.editor.save().await;
        assert!(matches!(outcome, SaveOutcome::Failed(ref err) if err.is_transient()));
        assert_eq!(h.editor.mode(), EditMode::Editing);
        assert!(!h.editor.is_saving());
        assert_eq!(h.editor.draft().unwrap().line_items.len(), 1);

        assert!(h.editor.save().await.is_saved());
        assert_eq!(h.updater.call_count(), 2);
    }

    #[tokio::test]
    async fn test_save_without_draft_is_skipped() {
        let h = harness(invoice_with_items());
        assert!(matches!(h.editor.save().await, SaveOutcome::Skipped));
        assert_eq!(h.updater.call_count(), 0);
    }

    #[tokio::test]
    async fn test_save_without_updater_is_skipped() {
        let closer = Arc::new(CountingCloseHandler::new());
        let editor = InvoiceEditor::new(invoice_with_items(), Arc::new(RecordingDeletePort::new()), closer);
        editor.begin_edit().unwrap();

        assert!(!editor.can_save());
        assert!(matches!(editor.save().await, SaveOutcome::Skipped));
        assert_eq!(editor.mode(), EditMode::Editing);
    }

    #[tokio::test]
    async fn test_double_save_calls_collaborator_once() {
        let pending = Arc::new(PendingUpdatePort::new());
        let editor = InvoiceEditor::new(
            invoice_with_items(),
            Arc::new(RecordingDeletePort::new()),
            Arc::new(CountingCloseHandler::new()),
        )
        .with_updater(pending.clone());
        editor.begin_edit().unwrap();

        let second = tokio::select! {
            biased;
            _ = editor.save() => unreachable!("pending collaborator never completes"),
            outcome = async {
                assert!(editor.is_saving());
                editor.save().await
            } => outcome,
        };

        assert!(matches!(second, SaveOutcome::InFlight));
        assert_eq!(pending.call_count(), 1);
        // Dropping the first save future released the in-flight flag
        assert!(!editor.is_saving());
        assert_eq!(editor.mode(), EditMode::Editing);
    }

    #[tokio::test]
    async fn test_draft_is_read_only_while_saving() {
        let pending = Arc::new(PendingUpdatePort::new());
        let editor = InvoiceEditor::new(
            invoice_with_items(),
            Arc::new(RecordingDeletePort::new()),
            Arc::new(CountingCloseHandler::new()),
        )
        .with_updater(pending.clone());
        editor.begin_edit().unwrap();

        let results = tokio::select! {
            biased;
            _ = editor.save() => unreachable!("pending collaborator never completes"),
            results = async {
                vec![
                    editor.add_item(),
                    editor.remove_item(0),
                    editor.update_item(0, LineItemUpdate::Rate(dec!(1))),
                    editor.update_field(DraftUpdate::Notes("late edit".to_string())),
                    editor.cancel_edit(),
                    editor.begin_edit(),
                ]
            } => results,
        };

        for result in results {
            assert_eq!(result, Err(InvoiceError::SaveInFlight("INV-ID-1".to_string())));
        }
        assert_eq!(editor.draft().unwrap().line_items.len(), 2);
        assert!(editor.add_item().is_ok());
    }

    #[tokio::test]
    async fn test_save_through_in_memory_store_commits_changes() {
        let invoice = invoice_with_items();
        let store = Arc::new(InMemoryInvoiceStore::with_invoices([invoice.clone()]));
        let editor = InvoiceEditor::new(invoice, store.clone(), Arc::new(CountingCloseHandler::new()))
            .with_updater(store.clone());

        editor.begin_edit().unwrap();
        editor.remove_item(0).unwrap();
        assert!(editor.save().await.is_saved());

        let stored = store.get(&InvoiceId::new("INV-ID-1")).await.unwrap();
        assert_eq!(stored.total, dec!(40));
        assert_eq!(stored.line_items().len(), 1);
        // The editor's own copy is only refreshed by the caller
        assert_eq!(editor.invoice().total, dec!(340.00));
    }

    #[tokio::test]
    async fn test_store_rejection_is_reported_not_raised() {
        let invoice = invoice_with_items();
        let store = Arc::new(InMemoryInvoiceStore::new());
        let updater: Arc<dyn InvoiceUpdatePort> = store.clone();
        let editor = InvoiceEditor::new(invoice, store, Arc::new(CountingCloseHandler::new()))
            .with_updater(updater);

        editor.begin_edit().unwrap();
        let outcome = editor.save().await;

        assert!(matches!(outcome, SaveOutcome::Failed(ref err) if err.is_not_found()));
        assert!(editor.is_editing());
    }
}

// ============================================================================
// Delete and close
// ============================================================================

mod delete_and_close {
    use super::*;

    #[tokio::test]
    async fn test_delete_then_close() {
        let h = harness(invoice_with_items());
        h.editor.delete().await.unwrap();

        assert_eq!(h.deleter.deleted(), vec![InvoiceId::new("INV-ID-1")]);
        assert_eq!(h.closer.close_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_failure_propagates_and_stays_open() {
        let h = harness_with(invoice_with_items(), RecordingUpdatePort::new(), RecordingDeletePort::failing());

        let err = h.editor.delete().await.unwrap_err();
        assert!(err.to_string().contains("Service unavailable"));
        assert_eq!(h.closer.close_count(), 0);
    }

    #[test]
    fn test_close_discards_draft() {
        let h = harness(invoice_with_items());
        h.editor.begin_edit().unwrap();
        h.editor.add_item().unwrap();

        h.editor.close();

        assert_eq!(h.closer.close_count(), 1);
        assert_eq!(h.editor.mode(), EditMode::Viewing);
        assert_eq!(h.editor.computed_total(), dec!(340.00));
    }
}
