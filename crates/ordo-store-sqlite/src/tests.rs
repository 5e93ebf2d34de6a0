//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{Duration, NaiveDate};
use ordo_core::{
  quote::{Quote, QuotePool},
  shuffle::ShuffleManager,
  store::{ROTATION_STATE_KEY, StateStore},
};

use crate::SqliteStore;

fn store() -> SqliteStore {
  SqliteStore::open_in_memory().expect("in-memory store")
}

// ─── Key-value contract ──────────────────────────────────────────────────────

#[test]
fn get_missing_key_returns_none() {
  let s = store();
  assert!(s.get("absent").unwrap().is_none());
}

#[test]
fn set_then_get_round_trips() {
  let s = store();
  s.set("k", b"value bytes").unwrap();
  assert_eq!(s.get("k").unwrap().unwrap(), b"value bytes");
}

#[test]
fn set_overwrites_existing_value() {
  let s = store();
  s.set("k", b"first").unwrap();
  s.set("k", b"second").unwrap();
  assert_eq!(s.get("k").unwrap().unwrap(), b"second");
}

#[test]
fn clear_removes_key() {
  let s = store();
  s.set("k", b"value").unwrap();
  s.clear("k").unwrap();
  assert!(s.get("k").unwrap().is_none());
}

#[test]
fn clear_absent_key_is_not_an_error() {
  let s = store();
  s.clear("never set").unwrap();
}

#[test]
fn keys_are_independent() {
  let s = store();
  s.set("a", b"1").unwrap();
  s.set("b", b"2").unwrap();
  s.clear("a").unwrap();
  assert!(s.get("a").unwrap().is_none());
  assert_eq!(s.get("b").unwrap().unwrap(), b"2");
}

// ─── Rotation over SQLite ────────────────────────────────────────────────────

fn pool() -> QuotePool {
  QuotePool::new(
    (0..4)
      .map(|id| Quote {
        id,
        text:   format!("text {id}"),
        author: format!("author {id}"),
      })
      .collect(),
  )
}

#[test]
fn full_rotation_cycle_persists_through_sqlite() {
  let s = store();
  let mut shuffle = ShuffleManager::with_seed(pool(), &s, 23);
  let start = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();

  let mut seen: Vec<i64> = (0..4)
    .map(|d| {
      shuffle
        .quote_for_day(start + Duration::days(d))
        .unwrap()
        .expect("pool quote")
        .id
    })
    .collect();
  seen.sort_unstable();
  assert_eq!(seen, vec![0, 1, 2, 3]);

  let bytes = s.get(ROTATION_STATE_KEY).unwrap().expect("state persisted");
  let state: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
  assert_eq!(state["cycleNumber"], 1);
  assert_eq!(state["position"], 3);
}
