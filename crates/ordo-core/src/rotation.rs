//! Persisted rotation state for the general quote pool.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One cycle of the non-repeating quote rotation.
///
/// `order` is a uniformly shuffled permutation of every pool id and
/// `position` indexes into it; the invariant `position < order.len()` holds
/// whenever the state is well-formed. Persisted as JSON under
/// [`crate::store::ROTATION_STATE_KEY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationState {
  pub order:         Vec<i64>,
  pub position:      usize,
  pub cycle_number:  u32,
  /// Local calendar day of the last advance, `YYYY-MM-DD` on the wire.
  #[serde(rename = "lastAdvancedDate")]
  pub last_advanced: NaiveDate,
}

impl RotationState {
  /// `true` when `position` indexes a valid slot of `order`.
  pub fn position_in_bounds(&self) -> bool {
    self.position < self.order.len()
  }
}
