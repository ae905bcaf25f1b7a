//! SQLite connection setup.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tracing::{debug, info};

use crate::migration::Migrator;
use crate::{SqliteError, SqliteIdeaStore};

/// Owns the SQLite connection. All access is serialized through one mutex;
/// SQLite's own locking covers other processes sharing the file.
pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Open or create the database file at `path` and bring its schema up to date.
    pub fn open(path: &Path) -> Result<Arc<Self>, SqliteError> {
        info!("Opening SQLite database at {:?}", path);
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        Self::init(conn)
    }

    /// Open a private in-memory database (for testing).
    pub fn open_in_memory() -> Result<Arc<Self>, SqliteError> {
        debug!("Opening in-memory SQLite database");
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Arc<Self>, SqliteError> {
        Migrator::run(&conn)?;
        Ok(Arc::new(Self {
            conn: Mutex::new(conn),
        }))
    }

    /// Handle implementing [`journal_store::IdeaStore`] over this database.
    pub fn idea_store(self: &Arc<Self>) -> SqliteIdeaStore {
        SqliteIdeaStore::new(Arc::clone(self))
    }

    /// Run `f` with exclusive access to the connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, SqliteError>
    where
        F: FnOnce(&Connection) -> Result<T, SqliteError>,
    {
        let conn = self.conn.lock().map_err(|_| SqliteError::LockPoisoned)?;
        f(&conn)
    }
}
