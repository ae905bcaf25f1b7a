//! SQLite storage backend for Open Journal.
//!
//! Implements the storage traits from `journal-store` using `rusqlite`.
//! A single database file holds the `ideas` table plus a `schema_version`
//! table that drives migrations.

pub mod database;
pub mod error;
pub mod idea;
pub mod migration;

pub use database::SqliteDatabase;
pub use error::SqliteError;
pub use idea::SqliteIdeaStore;
