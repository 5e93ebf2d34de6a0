//! The orchestrator: liturgical-first daily quote selection and upcoming
//! feast lookahead.
//!
//! [`QuoteService`] composes the calendar, the Computus, the rank resolver,
//! and the shuffle rotation. Public queries never fail: every error is
//! recovered by a documented fallback or logged and reported as absence.

use std::collections::BTreeMap;

use chrono::{Datelike, Local, NaiveDate};

use crate::{
  calendar::{CalendarData, ResolvedCelebration, date_key, pick_highest_rank},
  easter,
  error::Result,
  quote::{LITURGICAL_QUOTE_ID, LiturgicalQuote, Quote},
  shuffle::ShuffleManager,
  store::StateStore,
};

// ─── Query results ───────────────────────────────────────────────────────────

/// The answer to "what is today's quote": the quote itself plus the name of
/// the liturgical celebration it came from, if any. Returning both together
/// avoids any call-order dependency between two separate queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyQuote {
  pub quote:       Quote,
  pub celebration: Option<String>,
}

/// An upcoming liturgical observance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingFeast {
  pub name:         String,
  pub date:         NaiveDate,
  /// Short human-readable form, e.g. `Dec 25`.
  pub display_date: String,
}

// ─── Service ─────────────────────────────────────────────────────────────────

/// Owns one immutable [`CalendarData`] and one [`ShuffleManager`] for the
/// process lifetime. Constructed once by the process entry point and passed
/// by reference to whatever needs it.
pub struct QuoteService<S: StateStore> {
  calendar: CalendarData,
  shuffle:  ShuffleManager<S>,
}

impl<S: StateStore> QuoteService<S> {
  pub fn new(calendar: CalendarData, shuffle: ShuffleManager<S>) -> Self {
    Self { calendar, shuffle }
  }

  pub fn calendar(&self) -> &CalendarData { &self.calendar }

  pub fn shuffle_mut(&mut self) -> &mut ShuffleManager<S> { &mut self.shuffle }

  /// Today's quote, anchored at the local calendar day. Failures are logged
  /// and yield `None`, so the caller always has a "nothing to show" path.
  pub fn todays_quote(&mut self) -> Option<DailyQuote> {
    match self.quote_for_date(Local::now().date_naive()) {
      Ok(daily) => daily,
      Err(err) => {
        tracing::warn!(%err, "daily quote lookup failed");
        None
      }
    }
  }

  /// The quote for `date`: a liturgical celebration's quote when one falls
  /// on that day, otherwise the next general-pool quote in rotation.
  pub fn quote_for_date(
    &mut self,
    date: NaiveDate,
  ) -> Result<Option<DailyQuote>> {
    if let Some(winner) = self.celebration_for_date(date) {
      let selected = select_quote_for_year(
        &winner.celebration.quotes,
        date.year(),
        &winner.celebration.name,
      );
      return Ok(Some(DailyQuote {
        quote:       Quote {
          id:     LITURGICAL_QUOTE_ID,
          text:   selected.text,
          author: selected.author,
        },
        celebration: Some(winner.celebration.name),
      }));
    }

    let quote = self.shuffle.quote_for_day(date)?;
    Ok(quote.map(|quote| DailyQuote { quote, celebration: None }))
  }

  /// The winning celebration for `date`, resolved by rank.
  fn celebration_for_date(&self, date: NaiveDate) -> Option<ResolvedCelebration> {
    let key = date_key(date);
    let mut candidates: Vec<ResolvedCelebration> = Vec::new();

    if let Some(fixed) = self.calendar.fixed_dates.get(&key) {
      candidates.push(ResolvedCelebration { celebration: fixed.clone(), date });
    }

    for (feast, feast_date) in easter::moveable_dates(date.year()) {
      if feast_date == date {
        if let Some(moveable) = self.calendar.moveable_dates.get(feast.key()) {
          candidates
            .push(ResolvedCelebration { celebration: moveable.clone(), date });
        }
      }
    }

    let winner = pick_highest_rank(&candidates)?.clone();
    if candidates.len() > 1 {
      tracing::info!(
        %date,
        chosen = %winner.celebration.name,
        out_of = candidates.len(),
        "resolved same-day celebration conflict"
      );
    }
    Some(winner)
  }

  /// The nearest liturgical observance strictly after `today`.
  ///
  /// Considers the current year; in November and December, or when nothing
  /// remains this year, next year's calendar is included as well so the
  /// lookahead works across New Year. Same-day conflicts are resolved by
  /// rank before picking the chronologically nearest date. Returns `None`
  /// only when the calendar is empty.
  pub fn next_liturgical_day(&self, today: NaiveDate) -> Option<UpcomingFeast> {
    let mut upcoming: Vec<ResolvedCelebration> = self
      .celebrations_in_year(today.year())
      .into_iter()
      .filter(|c| c.date > today)
      .collect();
    if upcoming.is_empty() || today.month() >= 11 {
      upcoming.extend(self.celebrations_in_year(today.year() + 1));
    }

    let mut by_date: BTreeMap<NaiveDate, Vec<ResolvedCelebration>> =
      BTreeMap::new();
    for item in upcoming {
      by_date.entry(item.date).or_default().push(item);
    }

    let (date, group) = by_date.into_iter().next()?;
    let winner = pick_highest_rank(&group)?;
    Some(UpcomingFeast {
      name: winner.celebration.name.clone(),
      date,
      display_date: date.format("%b %-d").to_string(),
    })
  }

  /// Local-day wrapper around [`Self::next_liturgical_day`].
  pub fn next_liturgical_day_from_now(&self) -> Option<UpcomingFeast> {
    self.next_liturgical_day(Local::now().date_naive())
  }

  /// Every celebration instance the calendar defines for `year`, fixed and
  /// moveable, pinned to concrete dates.
  fn celebrations_in_year(&self, year: i32) -> Vec<ResolvedCelebration> {
    let mut out = Vec::new();
    for (key, celebration) in &self.calendar.fixed_dates {
      if let Some(date) = parse_date_key(key, year) {
        out.push(ResolvedCelebration { celebration: celebration.clone(), date });
      }
    }
    for (feast, date) in easter::moveable_dates(year) {
      if let Some(celebration) = self.calendar.moveable_dates.get(feast.key()) {
        out.push(ResolvedCelebration { celebration: celebration.clone(), date });
      }
    }
    out
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Pick which of a celebration's quotes to show: a single quote is shown
/// every year, two alternate by year parity (even year shows the first).
fn select_quote_for_year(
  quotes: &[LiturgicalQuote],
  year: i32,
  name: &str,
) -> LiturgicalQuote {
  if quotes.is_empty() {
    tracing::warn!(
      celebration = name,
      "celebration has no quotes, using scriptural fallback"
    );
    return LiturgicalQuote {
      text:   "Rejoice in the Lord always; again I will say, rejoice.".into(),
      author: "Philippians 4:4".into(),
    };
  }
  if quotes.len() == 1 {
    return quotes[0].clone();
  }
  let index = if year % 2 == 0 { 0 } else { 1 };
  quotes[index.min(quotes.len() - 1)].clone()
}

/// Parse an `"MM-DD"` key into a date for `year`. `None` for malformed keys
/// or days that do not exist in `year` (e.g. `02-29` off leap years).
fn parse_date_key(key: &str, year: i32) -> Option<NaiveDate> {
  let (month, day) = key.split_once('-')?;
  NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}
