//! The idea service: the single entry point for creating, voting on and
//! reading ideas.
//!
//! The service is built once at startup around an [`IdeaBackend`]:
//! - `Local` — ideas live only in the persistence store
//! - `Ledger` — writes go to the external ledger, with a summary mirrored
//!   into the store
//!
//! Handlers share it through `Arc<IdeaService>`; there is no other mutable
//! global state.

pub mod backend;
pub mod error;
pub mod ids;
pub mod service;

pub use backend::{IdeaBackend, LedgerBackend, LedgerSettings, LocalBackend, DEFAULT_MODULE_NAME};
pub use error::ServiceError;
pub use ids::IdSequence;
pub use service::{IdeaService, NewIdea, Submission};
