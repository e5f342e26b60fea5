//! Currency converter over a fixed rate table
//!
//! Rates are units of each currency per one US dollar. Conversion goes
//! through USD: `amount / from_rate * to_rate`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ToolError;

/// Supported currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// British Pound
    Gbp,
    /// Japanese Yen
    Jpy,
    /// Indian Rupee
    Inr,
    /// Australian Dollar
    Aud,
    /// Canadian Dollar
    Cad,
    /// Swiss Franc
    Chf,
    /// Chinese Yuan
    Cny,
    /// Swedish Krona
    Sek,
    /// Tanzanian Shilling
    Tzs,
}

impl Currency {
    /// All currencies in rate-table order
    pub const ALL: [Self; 11] = [
        Self::Usd,
        Self::Eur,
        Self::Gbp,
        Self::Jpy,
        Self::Inr,
        Self::Aud,
        Self::Cad,
        Self::Chf,
        Self::Cny,
        Self::Sek,
        Self::Tzs,
    ];

    /// ISO 4217 code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Jpy => "JPY",
            Self::Inr => "INR",
            Self::Aud => "AUD",
            Self::Cad => "CAD",
            Self::Chf => "CHF",
            Self::Cny => "CNY",
            Self::Sek => "SEK",
            Self::Tzs => "TZS",
        }
    }

    /// English name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Usd => "US Dollar",
            Self::Eur => "Euro",
            Self::Gbp => "British Pound",
            Self::Jpy => "Japanese Yen",
            Self::Inr => "Indian Rupee",
            Self::Aud => "Australian Dollar",
            Self::Cad => "Canadian Dollar",
            Self::Chf => "Swiss Franc",
            Self::Cny => "Chinese Yuan",
            Self::Sek => "Swedish Krona",
            Self::Tzs => "Tanzanian Shilling",
        }
    }

    /// Units of this currency per one US dollar
    #[must_use]
    pub const fn rate_per_usd(&self) -> f64 {
        match self {
            Self::Usd => 1.0,
            Self::Eur => 0.92,
            Self::Gbp => 0.79,
            Self::Jpy => 149.0,
            Self::Inr => 83.0,
            Self::Aud => 1.52,
            Self::Cad => 1.36,
            Self::Chf => 0.88,
            Self::Cny => 7.24,
            Self::Sek => 10.50,
            Self::Tzs => 2580.0,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.code(), self.name())
    }
}

impl FromStr for Currency {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ToolError::UnknownCurrency(s.to_string()))
    }
}

/// Result of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    /// Amount in the source currency
    pub amount: f64,
    /// Source currency
    pub from: Currency,
    /// Amount in the target currency
    pub converted: f64,
    /// Target currency
    pub to: Currency,
}

impl std::fmt::Display for Conversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.2} {} = {:.2} {}",
            self.amount,
            self.from.code(),
            self.converted,
            self.to.code()
        )
    }
}

/// Converts `amount` from one currency to another via USD
#[must_use]
pub fn convert(amount: f64, from: Currency, to: Currency) -> Conversion {
    let amount_in_usd = amount / from.rate_per_usd();
    Conversion {
        amount,
        from,
        converted: amount_in_usd * to.rate_per_usd(),
        to,
    }
}

/// Parses a user-entered amount
pub fn parse_amount(text: &str) -> Result<f64, ToolError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| ToolError::InvalidAmount(text.to_string()))
}
