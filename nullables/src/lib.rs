//! Nullable infrastructure for deterministic testing.
//!
//! The service's external collaborators (idea storage and the ledger) sit
//! behind traits. This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be told to fail on demand
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod ledger;
pub mod store;

pub use ledger::{LedgerCall, NullLedger};
pub use store::NullIdeaStore;
