//! Utility tools that sit beside the calculator
//!
//! Both tools are pure functions: they never touch the accumulator or the
//! history.

pub mod age;
pub mod currency;

pub use age::{calculate_age, parse_date, AgeBreakdown};
pub use currency::{convert, parse_amount, Conversion, Currency};

use thiserror::Error;

/// Errors raised by the utility tools
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// Birth date lies after the reference date
    #[error("Birth date {birth} is after {today}")]
    BirthDateInFuture {
        /// The birth date entered
        birth: String,
        /// The reference date
        today: String,
    },
    /// A date could not be parsed
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
    /// Currency code not in the rate table
    #[error("Unknown currency '{0}'")]
    UnknownCurrency(String),
    /// Amount is not a finite number
    #[error("Please enter a valid amount: '{0}'")]
    InvalidAmount(String),
}
