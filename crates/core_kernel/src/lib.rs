//! Core Kernel - Foundational types for the invoice detail modal
//!
//! This crate provides the building blocks shared by the invoice domain and
//! the rendering adapter:
//! - Money types with precise decimal arithmetic
//! - String-backed identifiers issued by the invoicing backend
//! - The error type and marker trait for caller-supplied collaborators

pub mod money;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use identifiers::{InvoiceId, CustomerId, ItemId, LineItemId};
pub use ports::{PortError, DomainPort};
