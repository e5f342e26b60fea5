//! desk-calc: a desk calculator with persistent history
//!
//! The calculator is an accumulate-and-compute state machine: store a value,
//! pick an operator, accumulate the next value, compute on `=`. Completed
//! calculations are appended to a plain-text history file. An age calculator
//! and a fixed-rate currency converter sit alongside it.
//!
//! # Example
//!
//! ```rust
//! use desk_calc::prelude::*;
//!
//! let mut acc = Accumulator::new();
//! for token in ["5", "+", "3", "+", "2", "="] {
//!     let input: Input = token.parse().unwrap();
//!     acc.apply(input).unwrap();
//! }
//! assert_eq!(acc.display(), "10");
//!
//! // Errors abort the operation and leave the display alone
//! let mut acc = Accumulator::new();
//! acc.input_digit(7);
//! acc.apply_operator(Operation::Divide).unwrap();
//! acc.input_digit(0);
//! assert_eq!(acc.equals(), Err(CalcError::DivideByZero));
//! assert_eq!(acc.display(), "0");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

mod commands;
pub mod config;
pub mod core;
mod error;
pub mod handlers;
pub mod logging;
pub mod tools;

#[cfg(feature = "tui")]
pub mod tui;

pub use commands::{AgeArgs, Cli, Commands, ConvertArgs, EvalArgs, HistoryAction, HistoryArgs};
pub use config::{AppConfig, Verbosity};
pub use error::{AppError, AppResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::history::{History, HistoryEntry, HistoryError, HistoryStore};
    pub use crate::core::{Accumulator, CalcError, CalcResult, Input, Operation, UnaryFunction};
    pub use crate::tools::{AgeBreakdown, Conversion, Currency, ToolError};
}
