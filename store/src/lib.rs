//! Abstract storage traits for Open Journal.
//!
//! Every storage backend (SQLite, in-memory for testing) implements these
//! traits. The rest of the codebase depends only on the traits.

pub mod error;
pub mod idea;

pub use error::StoreError;
pub use idea::IdeaStore;
