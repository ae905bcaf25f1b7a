//! SQLite implementation of IdeaStore.

use std::sync::Arc;

use rusqlite::{params, Row};

use journal_store::{IdeaStore, StoreError};
use journal_types::{Idea, IdeaId, Timestamp};

use crate::{SqliteDatabase, SqliteError};

const IDEA_COLUMNS: &str = "id, title, description, author, votes, timestamp";

pub struct SqliteIdeaStore {
    db: Arc<SqliteDatabase>,
}

impl SqliteIdeaStore {
    pub fn new(db: Arc<SqliteDatabase>) -> Self {
        Self { db }
    }
}

/// Raw column values; converted separately so range violations surface as
/// [`StoreError::Corruption`] instead of a generic SQLite error.
struct IdeaRow {
    id: i64,
    title: Option<String>,
    description: Option<String>,
    author: Option<String>,
    votes: i64,
    timestamp: i64,
}

impl IdeaRow {
    fn from_row(row: &Row) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            author: row.get(3)?,
            votes: row.get(4)?,
            timestamp: row.get(5)?,
        })
    }

    fn into_idea(self) -> Result<Idea, StoreError> {
        let corrupt = |what: &str| StoreError::Corruption(format!("idea {}: {what}", self.id));
        let id = u64::try_from(self.id).map_err(|_| corrupt("negative id"))?;
        let votes = u64::try_from(self.votes).map_err(|_| corrupt("negative vote count"))?;
        let timestamp = u64::try_from(self.timestamp).map_err(|_| corrupt("negative timestamp"))?;
        let title = self.title.ok_or_else(|| corrupt("missing title"))?;
        let description = self
            .description
            .ok_or_else(|| corrupt("missing description"))?;
        Ok(Idea {
            id: IdeaId::new(id),
            title,
            description,
            author: self.author.unwrap_or_default(),
            votes,
            timestamp: Timestamp::new(timestamp),
        })
    }
}

fn to_sql_int(value: u64, what: &str) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_| StoreError::Backend(format!("{what} out of range: {value}")))
}

fn is_primary_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

impl IdeaStore for SqliteIdeaStore {
    fn create(&self, idea: &Idea) -> Result<(), StoreError> {
        let id = to_sql_int(idea.id.as_u64(), "id")?;
        let votes = to_sql_int(idea.votes, "votes")?;
        let timestamp = to_sql_int(idea.timestamp.as_secs(), "timestamp")?;

        let inserted = self.db.with_conn(|conn| {
            let result = conn.execute(
                "INSERT INTO ideas (id, title, description, author, votes, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![id, idea.title, idea.description, idea.author, votes, timestamp],
            );
            match result {
                Ok(_) => Ok(true),
                Err(e) if is_primary_key_violation(&e) => Ok(false),
                Err(e) => Err(SqliteError::from(e)),
            }
        })?;

        if !inserted {
            return Err(StoreError::Duplicate(format!("idea {}", idea.id)));
        }
        tracing::debug!(id = %idea.id, "idea inserted");
        Ok(())
    }

    fn list(&self) -> Result<Vec<Idea>, StoreError> {
        let rows = self.db.with_conn(|conn| {
            let mut stmt =
                conn.prepare_cached(&format!("SELECT {IDEA_COLUMNS} FROM ideas ORDER BY id ASC"))?;
            let rows = stmt
                .query_map([], IdeaRow::from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })?;
        rows.into_iter().map(IdeaRow::into_idea).collect()
    }

    fn get_by_id(&self, id: IdeaId) -> Result<Idea, StoreError> {
        let key = to_sql_int(id.as_u64(), "id")?;
        let row = self.db.with_conn(|conn| {
            let mut stmt =
                conn.prepare_cached(&format!("SELECT {IDEA_COLUMNS} FROM ideas WHERE id = ?1"))?;
            match stmt.query_row(params![key], IdeaRow::from_row) {
                Ok(row) => Ok(Some(row)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(SqliteError::from(e)),
            }
        })?;
        row.ok_or_else(|| StoreError::NotFound(format!("idea {id}")))?
            .into_idea()
    }

    fn increment_vote(&self, id: IdeaId) -> Result<Idea, StoreError> {
        let key = to_sql_int(id.as_u64(), "id")?;
        let row = self.db.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(&format!(
                "UPDATE ideas SET votes = votes + 1 WHERE id = ?1 RETURNING {IDEA_COLUMNS}"
            ))?;
            match stmt.query_row(params![key], IdeaRow::from_row) {
                Ok(row) => Ok(Some(row)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(SqliteError::from(e)),
            }
        })?;
        let idea = row
            .ok_or_else(|| StoreError::NotFound(format!("idea {id}")))?
            .into_idea()?;
        tracing::debug!(id = %idea.id, votes = idea.votes, "vote recorded");
        Ok(idea)
    }

    fn max_id(&self) -> Result<Option<IdeaId>, StoreError> {
        let max: Option<i64> = self.db.with_conn(|conn| {
            Ok(conn.query_row("SELECT MAX(id) FROM ideas", [], |row| row.get(0))?)
        })?;
        match max {
            None => Ok(None),
            Some(v) => u64::try_from(v)
                .map(|id| Some(IdeaId::new(id)))
                .map_err(|_| StoreError::Corruption(format!("negative idea id {v}"))),
        }
    }

    fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = self.db.with_conn(|conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM ideas", [], |row| row.get(0))?)
        })?;
        Ok(count.max(0) as u64)
    }
}
