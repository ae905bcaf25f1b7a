//! Open Journal node — configuration, logging, shutdown and the wiring of
//! storage, ledger client, idea service and HTTP API.

pub mod config;
pub mod error;
pub mod logging;
pub mod node;
pub mod shutdown;

pub use config::JournalConfig;
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
pub use node::JournalNode;
pub use shutdown::ShutdownController;
