use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger node returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("request to ledger node failed: {0}")]
    Transport(String),

    #[error("invalid response from ledger node: {0}")]
    Decode(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("transaction {hash} rejected: {vm_status}")]
    Rejected { hash: String, vm_status: String },

    #[error("no confirmation within {0}s")]
    Timeout(u64),

    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    #[error("no signing credential configured")]
    MissingCredential,
}

impl From<reqwest::Error> for LedgerError {
    fn from(e: reqwest::Error) -> Self {
        LedgerError::Transport(e.to_string())
    }
}
