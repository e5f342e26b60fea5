//! Age calculator
//!
//! Splits the span between a birth date and a reference date into whole
//! years, months and days, borrowing across month lengths the way a
//! calendar does.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ToolError;

/// Date layout accepted on the command line
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An age split into calendar units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBreakdown {
    /// Whole years
    pub years: u32,
    /// Whole months after the years (0-11)
    pub months: u32,
    /// Remaining days after the months
    pub days: u32,
    /// Total days between the two dates
    pub total_days: i64,
}

impl std::fmt::Display for AgeBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Age: {} years, {} months, {} days (total days: {})",
            self.years, self.months, self.days, self.total_days
        )
    }
}

/// Parses a `YYYY-MM-DD` date
pub fn parse_date(text: &str) -> Result<NaiveDate, ToolError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| ToolError::InvalidDate(text.to_string()))
}

/// Computes the age at `today` of someone born on `birth`.
///
/// Months are counted by stepping whole calendar months from the birth date;
/// a day that does not exist in the target month clamps to its last day
/// (Jan 31 plus one month is Feb 28 or 29).
pub fn calculate_age(birth: NaiveDate, today: NaiveDate) -> Result<AgeBreakdown, ToolError> {
    let in_future = || ToolError::BirthDateInFuture {
        birth: birth.to_string(),
        today: today.to_string(),
    };
    if birth > today {
        return Err(in_future());
    }

    // Calendar months between the two dates, ignoring the day of month;
    // never negative once `birth <= today`
    let month_span = (today.year() - birth.year()) * 12 + today.month() as i32
        - birth.month() as i32;
    let mut months = u32::try_from(month_span).map_err(|_| in_future())?;
    let mut anchor = add_months(birth, months)?;
    while anchor > today && months > 0 {
        months -= 1;
        anchor = add_months(birth, months)?;
    }

    let days = u32::try_from((today - anchor).num_days()).map_err(|_| in_future())?;
    Ok(AgeBreakdown {
        years: months / 12,
        months: months % 12,
        days,
        total_days: (today - birth).num_days(),
    })
}

fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate, ToolError> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| ToolError::InvalidDate(date.to_string()))
}
