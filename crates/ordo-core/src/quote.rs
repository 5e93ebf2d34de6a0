//! Quote types and the general quote pool.

use serde::{Deserialize, Serialize};

/// Marker id for quotes sourced from a liturgical celebration rather than
/// the general pool. Pool ids are never negative.
pub const LITURGICAL_QUOTE_ID: i64 = -1;

/// A single quote from the general pool. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
  pub id:     i64,
  pub text:   String,
  pub author: String,
}

/// A quote attached to a liturgical celebration; carries no pool id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiturgicalQuote {
  pub text:   String,
  pub author: String,
}

/// Shape of the quote-pool source document. The original file also carries a
/// `playback` object; it is ignored here because rotation state is persisted
/// independently.
#[derive(Debug, Deserialize)]
struct QuotesDocument {
  quotes: Vec<Quote>,
}

/// The immutable general quote pool, loaded once at startup.
#[derive(Debug, Clone)]
pub struct QuotePool {
  quotes: Vec<Quote>,
}

impl QuotePool {
  /// Build a pool from raw quotes. Quotes with negative ids are dropped:
  /// ids below zero are reserved for liturgical quotes.
  pub fn new(quotes: Vec<Quote>) -> Self {
    let (quotes, rejected): (Vec<_>, Vec<_>) =
      quotes.into_iter().partition(|q| q.id >= 0);
    if !rejected.is_empty() {
      tracing::warn!(
        count = rejected.len(),
        "dropping quotes with reserved negative ids"
      );
    }
    Self { quotes }
  }

  /// Parse the `{"quotes": [...]}` source document, substituting the
  /// built-in fallback pool when the bytes are malformed.
  pub fn from_json_bytes(bytes: &[u8]) -> Self {
    match serde_json::from_slice::<QuotesDocument>(bytes) {
      Ok(doc) => Self::new(doc.quotes),
      Err(err) => {
        tracing::warn!(%err, "failed to parse quote pool, using fallback quote");
        Self::fallback()
      }
    }
  }

  /// Single built-in quote used when the pool cannot be loaded.
  pub fn fallback() -> Self {
    Self {
      quotes: vec![Quote {
        id:     0,
        text:   "You have made us for yourself, O Lord, and our hearts are \
                 restless until they rest in you."
          .into(),
        author: "St. Augustine".into(),
      }],
    }
  }

  pub fn quotes(&self) -> &[Quote] { &self.quotes }

  pub fn len(&self) -> usize { self.quotes.len() }

  pub fn is_empty(&self) -> bool { self.quotes.is_empty() }

  /// Every pool id, in document order.
  pub fn ids(&self) -> Vec<i64> { self.quotes.iter().map(|q| q.id).collect() }

  pub fn by_id(&self, id: i64) -> Option<&Quote> {
    self.quotes.iter().find(|q| q.id == id)
  }
}
