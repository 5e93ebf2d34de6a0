//! [`SqliteStore`] — the SQLite implementation of [`StateStore`].

use std::path::Path;

use ordo_core::store::StateStore;
use rusqlite::{Connection, OptionalExtension as _};

use crate::{Error, Result, schema::SCHEMA};

/// A state store backed by a single SQLite file.
pub struct SqliteStore {
  conn: Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = Connection::open(path)?;
    let store = Self { conn };
    store.init_schema()?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory()?;
    let store = Self { conn };
    store.init_schema()?;
    Ok(store)
  }

  fn init_schema(&self) -> Result<()> {
    self.conn.execute_batch(SCHEMA)?;
    Ok(())
  }
}

impl StateStore for SqliteStore {
  type Error = Error;

  fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
    let value = self
      .conn
      .query_row(
        "SELECT value FROM state WHERE key = ?1",
        rusqlite::params![key],
        |row| row.get(0),
      )
      .optional()?;
    Ok(value)
  }

  fn set(&self, key: &str, value: &[u8]) -> Result<()> {
    self.conn.execute(
      "INSERT INTO state (key, value) VALUES (?1, ?2)
       ON CONFLICT(key) DO UPDATE SET value = excluded.value",
      rusqlite::params![key, value],
    )?;
    Ok(())
  }

  fn clear(&self, key: &str) -> Result<()> {
    self
      .conn
      .execute("DELETE FROM state WHERE key = ?1", rusqlite::params![key])?;
    Ok(())
  }
}
