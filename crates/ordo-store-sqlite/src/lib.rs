//! SQLite backend for the ordo state store.
//!
//! A single key/value table holds the rotation state. Access is synchronous
//! rusqlite: the engine contract is single-threaded, and both the primary
//! app and a lightweight secondary consumer (widget, dashboard) can open the
//! same file to share the rotation state.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
