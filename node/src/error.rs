use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("config error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] journal_store::StoreError),

    #[error("database error: {0}")]
    Database(#[from] journal_store_sqlite::SqliteError),

    #[error("service error: {0}")]
    Service(#[from] journal_service::ServiceError),

    #[error("ledger client error: {0}")]
    Ledger(#[from] journal_chain::LedgerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RPC server error: {0}")]
    Rpc(#[from] journal_rpc::RpcError),

    #[error("logging already initialised: {0}")]
    Logging(String),
}
