//! Invoice Collaborator Ports
//!
//! The editor persists nothing itself. The caller supplies:
//!
//! - an [`InvoiceUpdatePort`] that commits a draft (optional; without one
//!   saving is unavailable)
//! - an [`InvoiceDeletePort`] that deletes the invoice
//! - a [`CloseHandler`] that dismisses the dialog
//!
//! ```rust,ignore
//! let store = Arc::new(InMemoryInvoiceStore::new());
//! let editor = InvoiceEditor::new(invoice, store.clone(), closer)
//!     .with_updater(store);
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, InvoiceId, PortError};

use crate::draft::InvoiceDraft;

/// Commits edits made to an invoice
#[async_trait]
pub trait InvoiceUpdatePort: DomainPort {
    /// Sends the draft for the given invoice to the backend
    ///
    /// # Arguments
    ///
    /// * `id` - The invoice being edited
    /// * `draft` - Snapshot of the draft taken when the save started
    async fn update_invoice(&self, id: &InvoiceId, draft: InvoiceDraft) -> Result<(), PortError>;
}

/// Deletes invoices
#[async_trait]
pub trait InvoiceDeletePort: DomainPort {
    /// Deletes the given invoice
    async fn delete_invoice(&self, id: &InvoiceId) -> Result<(), PortError>;
}

/// Dismisses the dialog hosting the editor
pub trait CloseHandler: Send + Sync {
    fn close(&self);
}

/// Mock implementations of the collaborator ports for testing
///
/// This module is only available with the `mock` feature or in tests.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records every update call and answers with a configurable result
    #[derive(Default)]
    pub struct RecordingUpdatePort {
        calls: Mutex<Vec<(InvoiceId, InvoiceDraft)>>,
        failures_remaining: AtomicUsize,
    }

    impl RecordingUpdatePort {
        /// Creates a port whose updates always succeed
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a port that fails the first `count` updates
        pub fn failing(count: usize) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                failures_remaining: AtomicUsize::new(count),
            }
        }

        /// Returns the number of update calls received
        pub fn call_count(&self) -> usize {
            self.calls.lock().map(|calls| calls.len()).unwrap_or_default()
        }

        /// Returns the drafts received, in call order
        pub fn drafts(&self) -> Vec<InvoiceDraft> {
            self.calls
                .lock()
                .map(|calls| calls.iter().map(|(_, draft)| draft.clone()).collect())
                .unwrap_or_default()
        }

        /// Returns the invoice ids received, in call order
        pub fn invoice_ids(&self) -> Vec<InvoiceId> {
            self.calls
                .lock()
                .map(|calls| calls.iter().map(|(id, _)| id.clone()).collect())
                .unwrap_or_default()
        }
    }

    impl DomainPort for RecordingUpdatePort {}

    #[async_trait]
    impl InvoiceUpdatePort for RecordingUpdatePort {
        async fn update_invoice(&self, id: &InvoiceId, draft: InvoiceDraft) -> Result<(), PortError> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push((id.clone(), draft));
            }

            let failing = self
                .failures_remaining
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if failing {
                Err(PortError::connection("update rejected by mock"))
            } else {
                Ok(())
            }
        }
    }

    /// Update port whose calls never complete
    #[derive(Default)]
    pub struct PendingUpdatePort {
        calls: AtomicUsize,
    }

    impl PendingUpdatePort {
        /// Creates a new pending port
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns the number of update calls received
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DomainPort for PendingUpdatePort {}

    #[async_trait]
    impl InvoiceUpdatePort for PendingUpdatePort {
        async fn update_invoice(&self, _id: &InvoiceId, _draft: InvoiceDraft) -> Result<(), PortError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::future::pending::<Result<(), PortError>>().await
        }
    }

    /// Records delete calls, optionally failing them
    #[derive(Default)]
    pub struct RecordingDeletePort {
        deleted: Mutex<Vec<InvoiceId>>,
        fail: bool,
    }

    impl RecordingDeletePort {
        /// Creates a port whose deletes succeed
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a port whose deletes always fail
        pub fn failing() -> Self {
            Self {
                deleted: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        /// Returns the ids passed to successful deletes
        pub fn deleted(&self) -> Vec<InvoiceId> {
            self.deleted.lock().map(|ids| ids.clone()).unwrap_or_default()
        }
    }

    impl DomainPort for RecordingDeletePort {}

    #[async_trait]
    impl InvoiceDeletePort for RecordingDeletePort {
        async fn delete_invoice(&self, id: &InvoiceId) -> Result<(), PortError> {
            if self.fail {
                return Err(PortError::ServiceUnavailable {
                    service: "invoices".to_string(),
                });
            }
            if let Ok(mut deleted) = self.deleted.lock() {
                deleted.push(id.clone());
            }
            Ok(())
        }
    }

    /// Counts close requests
    #[derive(Default)]
    pub struct CountingCloseHandler {
        closes: AtomicUsize,
    }

    impl CountingCloseHandler {
        /// Creates a new handler
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns how many times the dialog was asked to close
        pub fn close_count(&self) -> usize {
            self.closes.load(Ordering::SeqCst)
        }
    }

    impl CloseHandler for CountingCloseHandler {
        fn close(&self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }
}
