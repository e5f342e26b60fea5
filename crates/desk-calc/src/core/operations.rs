//! Arithmetic performed by the accumulator
//!
//! Type-safe operation enums mean every keypad function has exactly one
//! place where its math and its error policy are defined.

use serde::{Deserialize, Serialize};

use crate::core::{format_number, CalcError, CalcResult};

/// Binary operator awaiting its right operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (−)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
}

impl Operation {
    /// All binary operations, in keypad order (top to bottom)
    pub const ALL: [Self; 4] = [Self::Divide, Self::Multiply, Self::Subtract, Self::Add];

    /// Returns the operator symbol shown on the keypad and in history
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Parses an operator from its keypad symbol or ASCII equivalent
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" | "−" => Some(Self::Subtract),
            "*" | "x" | "×" => Some(Self::Multiply),
            "/" | "÷" => Some(Self::Divide),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Single-operand keypad functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryFunction {
    /// x²
    Square,
    /// √x
    SquareRoot,
    /// 1/x
    Reciprocal,
    /// ±
    Negate,
    /// %: a percentage of the stored operand
    Percent,
}

impl UnaryFunction {
    /// Returns the keypad label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Square => "x²",
            Self::SquareRoot => "√x",
            Self::Reciprocal => "1/x",
            Self::Negate => "±",
            Self::Percent => "%",
        }
    }

    /// Whether a successful application is recorded in history
    #[must_use]
    pub const fn records_history(&self) -> bool {
        matches!(self, Self::Square | Self::SquareRoot | Self::Reciprocal)
    }

    /// History description of applying this function to `value`
    #[must_use]
    pub fn describe(&self, value: f64) -> String {
        let v = format_number(value);
        match self {
            Self::Square => format!("sqr({v})"),
            Self::SquareRoot => format!("√({v})"),
            Self::Reciprocal => format!("1/({v})"),
            Self::Negate => format!("negate({v})"),
            Self::Percent => format!("{v}%"),
        }
    }
}

/// Computes `a op b`.
///
/// Division by zero is refused rather than producing an infinity.
pub fn compute(a: f64, b: f64, op: Operation) -> CalcResult<f64> {
    match op {
        Operation::Add => Ok(a + b),
        Operation::Subtract => Ok(a - b),
        Operation::Multiply => Ok(a * b),
        Operation::Divide => {
            if b == 0.0 {
                Err(CalcError::DivideByZero)
            } else {
                Ok(a / b)
            }
        }
    }
}

/// Applies a unary function to `value`; `stored` only matters for percent.
pub fn apply_unary(function: UnaryFunction, value: f64, stored: f64) -> CalcResult<f64> {
    match function {
        UnaryFunction::Square => Ok(value * value),
        UnaryFunction::SquareRoot => {
            if value < 0.0 {
                Err(CalcError::NegativeSqrt)
            } else {
                Ok(value.sqrt())
            }
        }
        UnaryFunction::Reciprocal => {
            if value == 0.0 {
                Err(CalcError::DivideByZero)
            } else {
                Ok(1.0 / value)
            }
        }
        UnaryFunction::Negate => Ok(-value),
        UnaryFunction::Percent => Ok(stored * (value / 100.0)),
    }
}
