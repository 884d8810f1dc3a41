//! Modal error handling

use thiserror::Error;

use core_kernel::PortError;
use domain_invoice::InvoiceError;

/// Errors surfaced to the host while handling modal events
#[derive(Debug, Error)]
pub enum ModalError {
    #[error("Editor error: {0}")]
    Editor(#[from] InvoiceError),

    #[error("Collaborator error: {0}")]
    Collaborator(#[from] PortError),

    #[error("Invalid {field}: {value:?} is not a YYYY-MM-DD date")]
    InvalidDate {
        field: &'static str,
        value: String,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
