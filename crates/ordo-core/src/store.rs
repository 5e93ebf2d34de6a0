//! The `StateStore` trait and an in-memory implementation.
//!
//! The trait is implemented by persistence backends (e.g.
//! `ordo-store-sqlite`). The shuffle engine depends on this abstraction,
//! not on any concrete backend.

use std::{collections::HashMap, convert::Infallible, sync::Mutex};

/// Key under which the JSON-encoded
/// [`RotationState`](crate::rotation::RotationState) is persisted.
pub const ROTATION_STATE_KEY: &str = "rotation-state";

/// Key under which the bare `YYYY-MM-DD` last-advanced day is mirrored on
/// every persist. Lightweight secondary consumers (e.g. a widget process
/// sharing the store) can read it without decoding the full state blob.
pub const LAST_ADVANCED_KEY: &str = "rotation-last-advanced";

/// Abstraction over an opaque key-value persistence store.
pub trait StateStore {
  type Error: std::error::Error + Send + Sync + 'static;

  fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error>;

  /// Write `value` under `key`, replacing any previous value.
  fn set(&self, key: &str, value: &[u8]) -> Result<(), Self::Error>;

  /// Remove `key` entirely. Clearing an absent key is not an error.
  fn clear(&self, key: &str) -> Result<(), Self::Error>;
}

impl<S: StateStore + ?Sized> StateStore for &S {
  type Error = S::Error;

  fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
    (**self).get(key)
  }

  fn set(&self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
    (**self).set(key, value)
  }

  fn clear(&self, key: &str) -> Result<(), Self::Error> {
    (**self).clear(key)
  }
}

/// In-memory store for tests and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
    self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}

impl StateStore for MemoryStore {
  type Error = Infallible;

  fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Infallible> {
    Ok(self.entries().get(key).cloned())
  }

  fn set(&self, key: &str, value: &[u8]) -> Result<(), Infallible> {
    self.entries().insert(key.to_owned(), value.to_vec());
    Ok(())
  }

  fn clear(&self, key: &str) -> Result<(), Infallible> {
    self.entries().remove(key);
    Ok(())
  }
}
