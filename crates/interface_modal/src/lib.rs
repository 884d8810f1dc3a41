//! Invoice Detail Modal
//!
//! Binds the framework-agnostic [`InvoiceEditor`](domain_invoice::InvoiceEditor)
//! to a rendering layer. The host feeds in props and user events and draws
//! the [`ModalView`] snapshot it gets back.
//!
//! # Architecture
//!
//! - **Modal**: props (`is_open`, invoice), collaborators, event dispatch
//! - **View**: plain-data snapshots of the details and edit screens
//! - **Command**: text commands for the `invoice-modal` console
//! - **Config**: date format and log level from the environment
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_modal::{InvoiceDetailModal, ModalCollaborators, ModalEvent};
//!
//! let mut modal = InvoiceDetailModal::new(config, collaborators);
//! modal.set_invoice(Some(invoice));
//! modal.set_open(true);
//!
//! modal.handle(ModalEvent::Edit).await?;
//! modal.handle(ModalEvent::AddLineItem).await?;
//! if let Some(view) = modal.render() {
//!     println!("{view}");
//! }
//! ```

pub mod config;
pub mod error;
pub mod modal;
pub mod view;
pub mod command;

pub use config::ModalConfig;
pub use error::ModalError;
pub use modal::{InvoiceDetailModal, ModalCollaborators, ModalEvent};
pub use view::{ActionButton, ModalAction, ModalBody, ModalView};
pub use command::{parse_command, Command};
