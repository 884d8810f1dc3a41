//! Adapters for the Invoice Collaborator Ports
//!
//! # Available Adapters
//!
//! - **InMemoryInvoiceStore**: keeps invoices in process memory; backs the
//!   demo binary and integration tests
//! - **Mock ports**: recording, failing and never-completing ports for tests
//!   (see `ports::mock`, feature `mock`)

pub mod memory;

pub use memory::InMemoryInvoiceStore;
