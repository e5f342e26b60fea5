//! Accumulate-and-compute state machine
//!
//! The accumulator is the whole calculator: it stores a left operand, picks
//! an operator, accumulates the next entry and computes on `=`. Front ends
//! translate key presses, button clicks or CLI tokens into [`Input`] events
//! and feed them to [`Accumulator::apply`].
//!
//! Evaluation is strictly left to right. There is no operator precedence:
//! `5 + 3 × 2 =` is `16`.

use std::str::FromStr;

use tracing::debug;

use crate::core::history::HistoryEntry;
use crate::core::{
    apply_unary, compute, format_number, parse_number, CalcError, CalcResult, Operation,
    UnaryFunction,
};

/// Every event the accumulator accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    /// A digit key (0-9)
    Digit(u8),
    /// The decimal point key
    DecimalPoint,
    /// A binary operator key
    Operator(Operation),
    /// The `=` key
    Equals,
    /// A single-operand function key
    Unary(UnaryFunction),
    /// `C`: reset everything
    ClearAll,
    /// `CE`: reset the current entry only
    ClearEntry,
    /// `⌫`: drop the last character of the entry
    Backspace,
}

impl Input {
    /// Returns the keypad label for this input
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::DecimalPoint => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Unary(f) => f.label().to_string(),
            Self::ClearAll => "C".to_string(),
            Self::ClearEntry => "CE".to_string(),
            Self::Backspace => "⌫".to_string(),
        }
    }

    /// Expands one token into inputs.
    ///
    /// Numeric tokens such as `12.5` become one input per character so that
    /// a command line like `12 + 3 =` reads naturally; anything else must be
    /// a single key label.
    pub fn parse_token(token: &str) -> CalcResult<Vec<Self>> {
        let is_number =
            token.len() > 1 && token.chars().all(|c| c.is_ascii_digit() || c == '.');
        if is_number {
            token.chars().map(|c| Self::from_str(&c.to_string())).collect()
        } else {
            Self::from_str(token).map(|input| vec![input])
        }
    }
}

impl FromStr for Input {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(op) = Operation::from_symbol(s) {
            return Ok(Self::Operator(op));
        }
        let input = match s {
            "." => Self::DecimalPoint,
            "=" => Self::Equals,
            "C" | "c" => Self::ClearAll,
            "CE" | "ce" => Self::ClearEntry,
            "⌫" | "bs" | "back" => Self::Backspace,
            "x²" | "sqr" => Self::Unary(UnaryFunction::Square),
            "√x" | "√" | "sqrt" => Self::Unary(UnaryFunction::SquareRoot),
            "1/x" | "inv" => Self::Unary(UnaryFunction::Reciprocal),
            "±" | "neg" => Self::Unary(UnaryFunction::Negate),
            "%" => Self::Unary(UnaryFunction::Percent),
            digit if digit.len() == 1 && digit.as_bytes()[0].is_ascii_digit() => {
                Self::Digit(digit.as_bytes()[0] - b'0')
            }
            other => return Err(CalcError::UnknownInput(other.to_string())),
        };
        Ok(input)
    }
}

/// Calculator state machine
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator {
    /// Left operand of the pending operation
    stored: f64,
    /// Operator awaiting its right operand
    pending: Option<Operation>,
    /// Text of the current entry or result
    display: String,
    /// Next digit starts a fresh number
    awaiting_new_entry: bool,
    /// Pending-expression indicator, e.g. `"5 +"`
    expression: String,
    /// Last event signalled an error
    error: bool,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator {
    /// Creates an accumulator showing `0`
    #[must_use]
    pub fn new() -> Self {
        Self {
            stored: 0.0,
            pending: None,
            display: "0".to_string(),
            awaiting_new_entry: true,
            expression: String::new(),
            error: false,
        }
    }

    /// Returns the display text
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Returns the pending-expression indicator (empty when nothing is pending)
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Returns the stored left operand
    #[must_use]
    pub fn stored(&self) -> f64 {
        self.stored
    }

    /// Returns the pending operator
    #[must_use]
    pub fn pending(&self) -> Option<Operation> {
        self.pending
    }

    /// Returns true when the next digit starts a new number
    #[must_use]
    pub fn is_awaiting_new_entry(&self) -> bool {
        self.awaiting_new_entry
    }

    /// Returns true while the error visual state is active
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error
    }

    /// Dispatches one input event.
    ///
    /// Returns the history entry produced by a completed calculation, if any.
    /// On error the attempted operation is aborted and the state is left as
    /// it was, apart from the error flag.
    pub fn apply(&mut self, input: Input) -> CalcResult<Option<HistoryEntry>> {
        debug!(?input, display = %self.display, "accumulator input");
        match input {
            Input::Digit(d) => {
                self.input_digit(d);
                Ok(None)
            }
            Input::DecimalPoint => {
                self.input_decimal_point();
                Ok(None)
            }
            Input::Operator(op) => self.apply_operator(op).map(|()| None),
            Input::Equals => self.equals(),
            Input::Unary(function) => self.unary(function),
            Input::ClearAll => {
                self.clear_all();
                Ok(None)
            }
            Input::ClearEntry => {
                self.clear_entry();
                Ok(None)
            }
            Input::Backspace => {
                self.backspace();
                Ok(None)
            }
        }
    }

    /// Types a digit; values above 9 are ignored
    pub fn input_digit(&mut self, digit: u8) {
        let Some(ch) = char::from_digit(u32::from(digit), 10) else {
            debug!(digit, "ignoring out-of-range digit");
            return;
        };
        self.error = false;
        if self.awaiting_new_entry {
            self.display = ch.to_string();
            self.awaiting_new_entry = false;
        } else if self.display == "0" {
            self.display = ch.to_string();
        } else {
            self.display.push(ch);
        }
    }

    /// Types a decimal point; a no-op if the entry already has one
    pub fn input_decimal_point(&mut self) {
        self.error = false;
        if self.awaiting_new_entry {
            self.display = "0.".to_string();
            self.awaiting_new_entry = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    /// Selects a binary operator, first folding in any pending one
    pub fn apply_operator(&mut self, op: Operation) -> CalcResult<()> {
        let value = self.entry_value()?;
        if let Some(pending) = self.pending {
            let result = self.checked(compute(self.stored, value, pending))?;
            self.stored = result;
            self.display = format_number(result);
        } else {
            self.stored = value;
        }
        self.pending = Some(op);
        self.awaiting_new_entry = true;
        self.expression = format!("{} {}", format_number(self.stored), op);
        Ok(())
    }

    /// Completes the pending operation.
    ///
    /// A no-op when nothing is pending.
    pub fn equals(&mut self) -> CalcResult<Option<HistoryEntry>> {
        let Some(op) = self.pending else {
            return Ok(None);
        };
        let value = self.entry_value()?;
        let result = self.checked(compute(self.stored, value, op))?;
        let entry = HistoryEntry::new(
            format!(
                "{} {} {}",
                format_number(self.stored),
                op,
                format_number(value)
            ),
            format_number(result),
        );
        self.display = format_number(result);
        self.pending = None;
        self.awaiting_new_entry = true;
        self.expression.clear();
        debug!(entry = %entry.description(), "calculation completed");
        Ok(Some(entry))
    }

    /// Applies a single-operand function to the entry
    pub fn unary(&mut self, function: UnaryFunction) -> CalcResult<Option<HistoryEntry>> {
        let value = self.entry_value()?;
        let result = self.checked(apply_unary(function, value, self.stored))?;
        self.display = format_number(result);
        self.awaiting_new_entry = true;
        if function.records_history() {
            Ok(Some(HistoryEntry::new(
                function.describe(value),
                format_number(result),
            )))
        } else {
            Ok(None)
        }
    }

    /// `C`: resets everything
    pub fn clear_all(&mut self) {
        *self = Self::new();
    }

    /// `CE`: resets the current entry only
    pub fn clear_entry(&mut self) {
        self.display = "0".to_string();
        self.awaiting_new_entry = true;
    }

    /// `⌫`: drops the last character of the display.
    ///
    /// Falls back to `0` when what is left is not a number (`""`, `"-"`, or
    /// the stub of `inf`/`NaN`).
    pub fn backspace(&mut self) {
        self.display.pop();
        if parse_number(&self.display).is_err() {
            self.display = "0".to_string();
        }
    }

    fn entry_value(&mut self) -> CalcResult<f64> {
        let parsed = parse_number(&self.display);
        self.checked(parsed)
    }

    fn checked(&mut self, result: CalcResult<f64>) -> CalcResult<f64> {
        if let Err(err) = &result {
            debug!(%err, "operation aborted");
            self.error = true;
        }
        result
    }
}
