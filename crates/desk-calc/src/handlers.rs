//! Command handlers
//!
//! Each handler writes its normal output to `out` so it can be tested
//! against a buffer; problems the user should see but that do not fail the
//! command go to stderr.

use std::io::Write;

use chrono::Local;
use tracing::{error, info, warn};

use crate::commands::{AgeArgs, ConvertArgs, EvalArgs, HistoryAction};
use crate::config::AppConfig;
use crate::core::history::{HistoryEntry, HistoryStore};
use crate::core::{Accumulator, Input};
use crate::error::AppResult;
use crate::tools::{calculate_age, convert, parse_amount, parse_date, Currency};

/// Text shown when there is nothing in the history
pub const EMPTY_HISTORY_MESSAGE: &str = "No history available";

/// Opens the configured history file.
///
/// When the file cannot be read the calculator keeps working on a detached
/// store, which collects entries in memory but never writes over the file.
#[must_use]
pub fn open_history(config: &AppConfig) -> HistoryStore {
    match HistoryStore::open(&config.history_path) {
        Ok(store) => store,
        Err(err) => {
            error!(%err, path = %config.history_path.display(), "Error loading history");
            eprintln!("Error loading history: {err}");
            HistoryStore::detached(&config.history_path)
        }
    }
}

/// Appends an entry, reporting (never retrying) a failed write
pub fn record(store: &mut HistoryStore, entry: HistoryEntry) -> Option<String> {
    match store.append(entry) {
        Ok(()) => None,
        Err(err) => {
            warn!(%err, "Error saving history");
            Some(format!("Error saving history: {err}"))
        }
    }
}

/// `eval`: feeds tokens into a fresh accumulator and prints the display
pub fn run_eval(config: &AppConfig, args: &EvalArgs, out: &mut impl Write) -> AppResult<()> {
    let inputs = args
        .tokens
        .iter()
        .map(|token| Input::parse_token(token))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .flatten();

    let mut store = (!args.no_history).then(|| open_history(config));
    let mut accumulator = Accumulator::new();

    for input in inputs {
        match accumulator.apply(input) {
            Ok(Some(entry)) => {
                info!(entry = %entry.description(), "calculation recorded");
                if let Some(store) = store.as_mut() {
                    if let Some(message) = record(store, entry) {
                        eprintln!("{message}");
                    }
                }
            }
            Ok(None) => {}
            Err(err) => eprintln!("Error: {err}"),
        }
    }

    writeln!(out, "{}", accumulator.display())?;
    Ok(())
}

/// `history list` / `history clear`
pub fn run_history(
    config: &AppConfig,
    action: HistoryAction,
    out: &mut impl Write,
) -> AppResult<()> {
    match action {
        HistoryAction::List { json } => {
            let store = HistoryStore::open(&config.history_path)?;
            let history = store.history();
            if json {
                writeln!(out, "{}", history.to_json()?)?;
            } else if history.is_empty() {
                writeln!(out, "{EMPTY_HISTORY_MESSAGE}")?;
            } else {
                for entry in history.iter_newest_first() {
                    writeln!(out, "{}", entry.to_line())?;
                }
            }
        }
        HistoryAction::Clear => {
            let mut store = open_history(config);
            store.clear()?;
            info!(path = %store.path().display(), "history cleared");
            writeln!(out, "History cleared successfully")?;
        }
    }
    Ok(())
}

/// `age`: prints the age breakdown
pub fn run_age(args: &AgeArgs, out: &mut impl Write) -> AppResult<()> {
    let birth = parse_date(&args.birth)?;
    let today = match &args.today {
        Some(text) => parse_date(text)?,
        None => Local::now().date_naive(),
    };
    let age = calculate_age(birth, today)?;
    writeln!(out, "{age}")?;
    Ok(())
}

/// `convert`: prints the converted amount
pub fn run_convert(args: &ConvertArgs, out: &mut impl Write) -> AppResult<()> {
    let amount = parse_amount(&args.amount)?;
    let from: Currency = args.from.parse()?;
    let to: Currency = args.to.parse()?;
    writeln!(out, "{}", convert(amount, from, to))?;
    Ok(())
}

/// `currencies`: prints the rate table
pub fn run_currencies(out: &mut impl Write) -> AppResult<()> {
    for currency in Currency::ALL {
        writeln!(
            out,
            "{:<28} {:>10.2}",
            currency.to_string(),
            currency.rate_per_usd()
        )?;
    }
    Ok(())
}
