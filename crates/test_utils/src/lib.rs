//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! invoice detail modal test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built invoices and line items
//! - `builders`: Builder patterns for test data construction
//! - `assertions`: Assertion helpers for ledgers and totals
//! - `generators`: Property-based test data generators
//! - `collaborators`: Mock collaborator sets wired into an editor

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;
pub mod collaborators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
pub use collaborators::*;
