//! Error types for `ordo-core`.
//!
//! These never reach the presentation caller: every public query method
//! recovers per the fallback contract and returns an absence value instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("state store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("rotation state serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  /// Wrap a backend-specific store error.
  pub fn store(err: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
