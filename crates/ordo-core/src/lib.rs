//! Core types and resolution logic for the ordo daily-quote engine.
//!
//! One quote per calendar day: liturgical celebrations (fixed-date or
//! Easter-relative) take priority over a persistent, non-repeating shuffled
//! rotation of the general quote pool. This crate is deliberately free of
//! database dependencies; persistence backends implement
//! [`store::StateStore`].

pub mod calendar;
pub mod easter;
pub mod error;
pub mod quote;
pub mod rotation;
pub mod service;
pub mod shuffle;
pub mod store;

pub use error::{Error, Result};
