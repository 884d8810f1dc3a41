//! Mock Collaborator Sets
//!
//! Wires the mock ports from `domain_invoice::ports::mock` into an editor
//! and keeps handles to them for assertions.

use std::sync::Arc;

use domain_invoice::ports::mock::{CountingCloseHandler, RecordingDeletePort, RecordingUpdatePort};
use domain_invoice::{Invoice, InvoiceEditor};

/// Recording update/delete ports plus a counting close handler
pub struct MockCollaborators {
    pub updater: Arc<RecordingUpdatePort>,
    pub deleter: Arc<RecordingDeletePort>,
    pub closer: Arc<CountingCloseHandler>,
}

impl Default for MockCollaborators {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCollaborators {
    /// Collaborators that always succeed
    pub fn new() -> Self {
        Self {
            updater: Arc::new(RecordingUpdatePort::new()),
            deleter: Arc::new(RecordingDeletePort::new()),
            closer: Arc::new(CountingCloseHandler::new()),
        }
    }

    /// Collaborators whose first `count` updates fail
    pub fn with_failing_updates(count: usize) -> Self {
        Self {
            updater: Arc::new(RecordingUpdatePort::failing(count)),
            ..Self::new()
        }
    }

    /// Collaborators whose deletes fail
    pub fn with_failing_delete() -> Self {
        Self {
            deleter: Arc::new(RecordingDeletePort::failing()),
            ..Self::new()
        }
    }

    /// Builds an editor for the invoice using these collaborators
    pub fn editor(&self, invoice: Invoice) -> InvoiceEditor {
        InvoiceEditor::new(invoice, self.deleter.clone(), self.closer.clone())
            .with_updater(self.updater.clone())
    }
}
