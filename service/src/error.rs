use journal_chain::LedgerError;
use journal_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    /// Carries what was missing, e.g. `idea 7`.
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Config(String),

    /// The ledger refused, timed out or could not be reached. `action` is a
    /// short, client-safe summary; `source` carries the raw cause.
    #[error("{action} failed")]
    Adapter {
        action: &'static str,
        #[source]
        source: LedgerError,
    },

    #[error("{0} is not available in external mode")]
    NotImplemented(&'static str),

    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(key) => ServiceError::NotFound(key),
            other => ServiceError::Store(other),
        }
    }
}
