//! Core calculator module
//!
//! Everything the front ends drive lives here: the accumulate-and-compute
//! state machine, the arithmetic it performs, and the calculation history.

pub mod accumulator;
pub mod history;
mod operations;

pub use accumulator::{Accumulator, Input};
pub use operations::{apply_unary, compute, Operation, UnaryFunction};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
///
/// None of these are fatal: the accumulator aborts the attempted operation
/// and hands the error back so the front end can show it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division (or reciprocal) by zero attempted
    #[error("Cannot divide by zero")]
    DivideByZero,
    /// Square root of a negative number attempted
    #[error("Cannot calculate square root of negative number")]
    NegativeSqrt,
    /// The display does not hold a number
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),
    /// A token that is not a keypad label
    #[error("Unknown input: {0}")]
    UnknownInput(String),
}

/// Formats a value the way the display shows it.
///
/// Whole numbers drop the fractional part (`8`, not `8.0`).
#[must_use]
pub fn format_number(value: f64) -> String {
    format!("{value}")
}

/// Parses display text back into a value.
pub fn parse_number(text: &str) -> CalcResult<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| CalcError::InvalidEntry(text.to_string()))
}
