//! `ordo` — the daily quote, in the terminal.
//!
//! Loads the quote pool and liturgical calendar documents, opens the shared
//! SQLite state store, and prints today's quote. Missing or malformed
//! source files fall back to the built-in quote / an empty calendar rather
//! than failing: only an unopenable state store is fatal.

use std::{fs, path::PathBuf};

use anyhow::Context as _;
use chrono::Local;
use clap::Parser;
use ordo_core::{
  calendar::CalendarData, quote::QuotePool, service::QuoteService,
  shuffle::ShuffleManager,
};
use ordo_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
  name = "ordo",
  about = "Daily quote with liturgical calendar resolution"
)]
struct Cli {
  /// Path to the quote pool JSON document.
  #[arg(long, default_value = "quotes_database.json")]
  quotes: PathBuf,

  /// Path to the liturgical calendar JSON document.
  #[arg(long, default_value = "liturgical_calendar.json")]
  calendar: PathBuf,

  /// Path to the SQLite file holding the rotation state.
  #[arg(long, default_value = "ordo-state.sqlite3")]
  state: PathBuf,

  /// Also print the next upcoming liturgical day.
  #[arg(long)]
  next: bool,

  /// Discard the rotation state and start a fresh shuffle cycle.
  #[arg(long)]
  reset_shuffle: bool,
}

fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let pool = match fs::read(&cli.quotes) {
    Ok(bytes) => QuotePool::from_json_bytes(&bytes),
    Err(err) => {
      tracing::warn!(
        path = %cli.quotes.display(),
        %err,
        "quote pool unreadable, using fallback quote"
      );
      QuotePool::fallback()
    }
  };

  let calendar = match fs::read(&cli.calendar) {
    Ok(bytes) => CalendarData::from_json_bytes(&bytes),
    Err(err) => {
      tracing::warn!(
        path = %cli.calendar.display(),
        %err,
        "calendar unreadable, using empty calendar"
      );
      CalendarData::empty()
    }
  };

  let store = SqliteStore::open(&cli.state)
    .with_context(|| format!("opening state store at {}", cli.state.display()))?;

  let mut service = QuoteService::new(calendar, ShuffleManager::new(pool, store));

  if cli.reset_shuffle {
    service.shuffle_mut().reset(Local::now().date_naive())?;
    println!("shuffle reset");
  }

  match service.todays_quote() {
    Some(daily) => {
      println!("\"{}\"", daily.quote.text);
      println!("    — {}", daily.quote.author);
      if let Some(name) = &daily.celebration {
        println!("    ({name})");
      }
    }
    None => println!("no quote available today"),
  }

  if cli.next {
    match service.next_liturgical_day_from_now() {
      Some(feast) => {
        println!("next liturgical day: {} on {}", feast.name, feast.display_date);
      }
      None => println!("no upcoming liturgical day"),
    }
  }

  Ok(())
}
