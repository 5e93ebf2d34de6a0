//! Computus — moveable feast date calculation.
//!
//! Easter Sunday is computed with the Anonymous Gregorian algorithm in
//! exact integer arithmetic; the other nine moveable feasts are fixed day
//! offsets from Easter. Everything here is pure and callable per year.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// First year the Gregorian calendar, and therefore this algorithm, applies.
pub const GREGORIAN_EPOCH_YEAR: i32 = 1583;

/// The Gregorian date of Easter Sunday for `year`.
///
/// Returns `None` for years before [`GREGORIAN_EPOCH_YEAR`] or outside
/// chrono's representable range. The result always falls on a Sunday
/// between March 22 and April 25 inclusive.
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
  if year < GREGORIAN_EPOCH_YEAR {
    return None;
  }

  let a = year % 19;
  let b = year / 100;
  let c = year % 100;
  let d = b / 4;
  let e = b % 4;
  let f = (b + 8) / 25;
  let g = (b - f + 1) / 3;
  let h = (19 * a + b - d - g + 15) % 30;
  let i = c / 4;
  let k = c % 4;
  let l = (32 + 2 * e + 2 * i - h - k) % 7;
  let m = (a + 11 * h + 22 * l) / 451;
  let month = (h + l - 7 * m + 114) / 31;
  let day = (h + l - 7 * m + 114) % 31 + 1;

  NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// A liturgical observance whose date is derived from Easter's.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum MoveableFeast {
  AshWednesday,
  PalmSunday,
  HolyThursday,
  GoodFriday,
  EasterVigil,
  EasterSunday,
  DivineMercySunday,
  Ascension,
  Pentecost,
  CorpusChristi,
}

impl MoveableFeast {
  pub const ALL: [Self; 10] = [
    Self::AshWednesday,
    Self::PalmSunday,
    Self::HolyThursday,
    Self::GoodFriday,
    Self::EasterVigil,
    Self::EasterSunday,
    Self::DivineMercySunday,
    Self::Ascension,
    Self::Pentecost,
    Self::CorpusChristi,
  ];

  /// Key used by the calendar source document's `moveableDates` map.
  pub fn key(self) -> &'static str {
    match self {
      Self::AshWednesday => "ashWednesday",
      Self::PalmSunday => "palmSunday",
      Self::HolyThursday => "holyThursday",
      Self::GoodFriday => "goodFriday",
      Self::EasterVigil => "easterVigil",
      Self::EasterSunday => "easterSunday",
      Self::DivineMercySunday => "divineMercySunday",
      Self::Ascension => "ascension",
      Self::Pentecost => "pentecost",
      Self::CorpusChristi => "corpusChristi",
    }
  }

  /// Day offset from Easter Sunday.
  pub fn easter_offset(self) -> i64 {
    match self {
      Self::AshWednesday => -46,
      Self::PalmSunday => -7,
      Self::HolyThursday => -3,
      Self::GoodFriday => -2,
      Self::EasterVigil => -1,
      Self::EasterSunday => 0,
      Self::DivineMercySunday => 7,
      Self::Ascension => 39,
      Self::Pentecost => 49,
      Self::CorpusChristi => 60,
    }
  }
}

/// All ten moveable feast dates for `year`. Empty when Easter cannot be
/// computed for that year.
pub fn moveable_dates(year: i32) -> BTreeMap<MoveableFeast, NaiveDate> {
  let mut dates = BTreeMap::new();
  let Some(easter) = easter_sunday(year) else {
    return dates;
  };
  for feast in MoveableFeast::ALL {
    if let Some(date) =
      easter.checked_add_signed(Duration::days(feast.easter_offset()))
    {
      dates.insert(feast, date);
    }
  }
  dates
}
