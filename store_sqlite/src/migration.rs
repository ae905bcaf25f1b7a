//! Database schema migration engine.
//!
//! Tracks a monotonically increasing schema version in the `schema_version`
//! table and runs sequential migration functions to bring an older database
//! up to date.

use journal_types::LOCAL_AUTHOR;
use rusqlite::{params, Connection, OptionalExtension};

use crate::SqliteError;

/// The schema version that the current code expects.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

const IDEAS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS ideas (
        id          INTEGER PRIMARY KEY,
        title       TEXT NOT NULL,
        description TEXT NOT NULL,
        author      TEXT NOT NULL,
        votes       INTEGER NOT NULL DEFAULT 0 CHECK (votes >= 0),
        timestamp   INTEGER NOT NULL
    );
";

/// Runs database migrations to bring the schema up to date.
pub struct Migrator;

impl Migrator {
    /// Check the stored schema version and run any needed migrations.
    ///
    /// - Version 0 means a fresh database, or one written before versioning
    ///   existed (a bare `ideas` table with nullable columns).
    /// - If the stored version matches `CURRENT_SCHEMA_VERSION`, this is a no-op.
    /// - If the stored version is *higher* than what this code supports,
    ///   the database was written by a newer release and we refuse to open it.
    pub fn run(conn: &Connection) -> Result<(), SqliteError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL)",
            [],
        )?;
        let current = schema_version(conn)?;

        if current == CURRENT_SCHEMA_VERSION {
            tracing::info!(version = current, "database schema is up to date");
            return Ok(());
        }

        if current > CURRENT_SCHEMA_VERSION {
            return Err(SqliteError::Migration(format!(
                "database schema version {} is newer than supported version {}",
                current, CURRENT_SCHEMA_VERSION
            )));
        }

        for version in current..CURRENT_SCHEMA_VERSION {
            tracing::info!(from = version, to = version + 1, "running migration");
            run_migration(conn, version, version + 1)?;
        }

        conn.execute("DELETE FROM schema_version", [])?;
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![CURRENT_SCHEMA_VERSION],
        )?;

        tracing::info!(version = CURRENT_SCHEMA_VERSION, "migration complete");
        Ok(())
    }
}

/// Stored schema version, 0 if none has been recorded.
pub fn schema_version(conn: &Connection) -> Result<u32, SqliteError> {
    let version: Option<u32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(version.unwrap_or(0))
}

fn run_migration(conn: &Connection, from: u32, to: u32) -> Result<(), SqliteError> {
    match (from, to) {
        (0, 1) => {
            if table_exists(conn, "ideas")? {
                adopt_unversioned_table(conn)
            } else {
                conn.execute_batch(IDEAS_TABLE)?;
                Ok(())
            }
        }
        _ => Err(SqliteError::Migration(format!(
            "unknown migration: {} -> {}",
            from, to
        ))),
    }
}

/// Rebuild an unversioned `ideas` table under the current constraints.
///
/// Rows without a usable title or description cannot be served as ideas;
/// they are left behind in `ideas_unadopted` instead of being dropped.
fn adopt_unversioned_table(conn: &Connection) -> Result<(), SqliteError> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch("ALTER TABLE ideas RENAME TO ideas_unadopted;")?;
    tx.execute_batch(IDEAS_TABLE)?;

    let adopted = tx.execute(
        "INSERT OR IGNORE INTO ideas (id, title, description, author, votes, timestamp)
         SELECT id, title, description,
                COALESCE(NULLIF(TRIM(author), ''), ?1),
                MAX(COALESCE(votes, 0), 0),
                COALESCE(timestamp, 0)
         FROM ideas_unadopted
         WHERE id IS NOT NULL
           AND TRIM(COALESCE(title, ''), char(32, 9, 10, 13)) <> ''
           AND TRIM(COALESCE(description, ''), char(32, 9, 10, 13)) <> ''
         ORDER BY id",
        params![LOCAL_AUTHOR],
    )?;
    tx.execute(
        "DELETE FROM ideas_unadopted WHERE id IN (SELECT id FROM ideas)",
        [],
    )?;
    let skipped: i64 = tx.query_row("SELECT COUNT(*) FROM ideas_unadopted", [], |row| {
        row.get(0)
    })?;
    if skipped == 0 {
        tx.execute_batch("DROP TABLE ideas_unadopted;")?;
    }
    tx.commit()?;

    if skipped > 0 {
        tracing::warn!(adopted, skipped, "unversioned ideas left in ideas_unadopted");
    } else {
        tracing::info!(adopted, "adopted unversioned ideas table");
    }
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool, SqliteError> {
    let found: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}
