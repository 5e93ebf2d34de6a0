//! Persistent shuffled rotation over the general quote pool.
//!
//! The rotation advances exactly once per calendar day. Each cycle is a
//! uniform random permutation of every pool id, fully consumed before a
//! reshuffle starts the next cycle.

use chrono::{Local, NaiveDate};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{
  error::{Error, Result},
  quote::{Quote, QuotePool},
  rotation::RotationState,
  store::{LAST_ADVANCED_KEY, ROTATION_STATE_KEY, StateStore},
};

/// Owns the quote pool, the persistence store, and the rotation RNG.
///
/// The manager is the sole reader and writer of the rotation state keys in
/// its store; the contract is single-process, single-threaded access.
pub struct ShuffleManager<S: StateStore> {
  pool:  QuotePool,
  store: S,
  rng:   StdRng,
}

impl<S: StateStore> ShuffleManager<S> {
  /// Entropy-seeded manager for production use.
  pub fn new(pool: QuotePool, store: S) -> Self {
    Self { pool, store, rng: StdRng::from_entropy() }
  }

  /// Deterministically seeded manager, for tests.
  pub fn with_seed(pool: QuotePool, store: S, seed: u64) -> Self {
    Self { pool, store, rng: StdRng::seed_from_u64(seed) }
  }

  pub fn pool(&self) -> &QuotePool { &self.pool }

  pub fn store(&self) -> &S { &self.store }

  /// Today's general-pool quote, anchored at the local calendar day.
  /// Store and serialization failures are logged and yield `None`.
  pub fn todays_quote(&mut self) -> Option<Quote> {
    match self.quote_for_day(Local::now().date_naive()) {
      Ok(quote) => quote,
      Err(err) => {
        tracing::warn!(%err, "rotation lookup failed");
        None
      }
    }
  }

  /// The pool quote for `today`, advancing the rotation exactly once on the
  /// first call of a new day. Repeated calls on the same day return the
  /// same quote.
  pub fn quote_for_day(&mut self, today: NaiveDate) -> Result<Option<Quote>> {
    if self.pool.is_empty() {
      return Ok(None);
    }

    let mut state = self.load_or_init(today)?;
    if state.last_advanced != today {
      state = self.advance(state, today)?;
    }

    if let Some(quote) = self.read_current(&state) {
      return Ok(Some(quote));
    }

    // Corrupt state: position out of bounds, or the id at the current
    // position no longer exists in the pool. One reset-and-retry, then
    // give up for this lookup.
    tracing::warn!(
      position = state.position,
      cycle = state.cycle_number,
      "inconsistent rotation state, resetting shuffle"
    );
    let state = self.reset(today)?;
    Ok(self.read_current(&state))
  }

  /// Discard any persisted state and start a fresh cycle-1 shuffle.
  pub fn reset(&mut self, today: NaiveDate) -> Result<RotationState> {
    let state = RotationState {
      order:         self.shuffled_ids(),
      position:      0,
      cycle_number:  1,
      last_advanced: today,
    };
    self.persist(&state)?;
    Ok(state)
  }

  fn read_current(&self, state: &RotationState) -> Option<Quote> {
    let id = *state.order.get(state.position)?;
    let quote = self.pool.by_id(id).cloned()?;
    tracing::debug!(
      cycle = state.cycle_number,
      position = state.position + 1,
      of = state.order.len(),
      id,
      "rotation read"
    );
    Some(quote)
  }

  /// Load the persisted state, or create and persist the initial one.
  fn load_or_init(&mut self, today: NaiveDate) -> Result<RotationState> {
    let stored = self.store.get(ROTATION_STATE_KEY).map_err(Error::store)?;
    if let Some(bytes) = stored {
      match serde_json::from_slice(&bytes) {
        Ok(state) => return Ok(state),
        Err(err) => {
          tracing::warn!(%err, "undecodable rotation state, resetting shuffle");
        }
      }
    } else {
      tracing::info!("no rotation state found, creating initial shuffle");
    }
    self.reset(today)
  }

  /// The once-per-new-day step: move forward one slot, reshuffling into the
  /// next cycle when this one is exhausted.
  fn advance(
    &mut self,
    mut state: RotationState,
    today: NaiveDate,
  ) -> Result<RotationState> {
    state.position += 1;
    if state.position >= state.order.len() {
      tracing::info!(
        completed_cycle = state.cycle_number,
        "rotation cycle complete, reshuffling"
      );
      state.order = self.shuffled_ids();
      state.position = 0;
      state.cycle_number += 1;
    }
    state.last_advanced = today;
    self.persist(&state)?;
    Ok(state)
  }

  fn shuffled_ids(&mut self) -> Vec<i64> {
    let mut ids = self.pool.ids();
    ids.shuffle(&mut self.rng);
    ids
  }

  fn persist(&self, state: &RotationState) -> Result<()> {
    let bytes = serde_json::to_vec(state)?;
    self
      .store
      .set(ROTATION_STATE_KEY, &bytes)
      .map_err(Error::store)?;
    self
      .store
      .set(LAST_ADVANCED_KEY, state.last_advanced.to_string().as_bytes())
      .map_err(Error::store)?;
    Ok(())
  }
}
