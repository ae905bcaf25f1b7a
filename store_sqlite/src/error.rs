use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqliteError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("connection lock poisoned")]
    LockPoisoned,

    #[error("migration error: {0}")]
    Migration(String),
}

impl From<SqliteError> for journal_store::StoreError {
    fn from(e: SqliteError) -> Self {
        journal_store::StoreError::Backend(e.to_string())
    }
}
