//! Liturgical calendar reference data and rank resolution.

use std::{collections::BTreeMap, fmt};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::quote::LiturgicalQuote;

// ─── Rank ────────────────────────────────────────────────────────────────────

/// Liturgical importance tier, used to resolve same-day conflicts.
/// Variant order gives the total order: later variants outrank earlier ones.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub enum Rank {
  #[default]
  Unranked,
  Commemoration,
  OptionalMemorial,
  Memorial,
  Feast,
  Solemnity,
}

impl Rank {
  /// Parse a source-document rank string. Case-insensitive; anything
  /// unrecognized is `Unranked`.
  pub fn parse(s: &str) -> Self {
    match s.to_ascii_lowercase().as_str() {
      "solemnity" => Self::Solemnity,
      "feast" => Self::Feast,
      "memorial" => Self::Memorial,
      "optional memorial" => Self::OptionalMemorial,
      "commemoration" => Self::Commemoration,
      _ => Self::Unranked,
    }
  }

  /// The discriminant string used by the source documents.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Solemnity => "solemnity",
      Self::Feast => "feast",
      Self::Memorial => "memorial",
      Self::OptionalMemorial => "optional memorial",
      Self::Commemoration => "commemoration",
      Self::Unranked => "unranked",
    }
  }
}

impl fmt::Display for Rank {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl Serialize for Rank {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

impl<'de> Deserialize<'de> for Rank {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    Ok(Rank::parse(&s))
  }
}

// ─── Celebration ─────────────────────────────────────────────────────────────

/// A fixed-date or moveable celebration from the calendar source document.
///
/// `color`, `season`, and `easter_offset` are pass-through metadata; the
/// resolution logic never reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Celebration {
  #[serde(rename = "celebration")]
  pub name:          String,
  pub rank:          Rank,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub color:         Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub season:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub easter_offset: Option<i64>,
  #[serde(default)]
  pub quotes:        Vec<LiturgicalQuote>,
}

/// A celebration instance pinned to a concrete calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCelebration {
  pub celebration: Celebration,
  pub date:        NaiveDate,
}

// ─── Calendar data ───────────────────────────────────────────────────────────

/// The full liturgical calendar: fixed dates keyed by `"MM-DD"`, moveable
/// celebrations keyed by feast name (see [`crate::easter::MoveableFeast`]).
/// Loaded once at startup; immutable thereafter. `BTreeMap` keeps iteration
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarData {
  #[serde(default)]
  pub fixed_dates:    BTreeMap<String, Celebration>,
  #[serde(default)]
  pub moveable_dates: BTreeMap<String, Celebration>,
}

impl CalendarData {
  /// A calendar with no celebrations; liturgical resolution always falls
  /// through to the general pool.
  pub fn empty() -> Self { Self::default() }

  /// Parse the calendar source document, substituting an empty calendar
  /// when the bytes are malformed.
  pub fn from_json_bytes(bytes: &[u8]) -> Self {
    match serde_json::from_slice(bytes) {
      Ok(data) => data,
      Err(err) => {
        tracing::warn!(%err, "failed to parse liturgical calendar, using empty calendar");
        Self::empty()
      }
    }
  }

  pub fn is_empty(&self) -> bool {
    self.fixed_dates.is_empty() && self.moveable_dates.is_empty()
  }
}

// ─── Rank resolution ─────────────────────────────────────────────────────────

/// Pick the single winning celebration for a day: highest rank first, equal
/// ranks broken by lexicographically smallest name. Returns `None` only for
/// an empty slice.
pub fn pick_highest_rank(
  candidates: &[ResolvedCelebration],
) -> Option<&ResolvedCelebration> {
  candidates.iter().reduce(|best, next| {
    let outranks = next.celebration.rank > best.celebration.rank
      || (next.celebration.rank == best.celebration.rank
        && next.celebration.name < best.celebration.name);
    if outranks { next } else { best }
  })
}

/// Format a date as the `"MM-DD"` lookup key used by `fixed_dates`.
pub fn date_key(date: NaiveDate) -> String {
  format!("{:02}-{:02}", date.month(), date.day())
}
