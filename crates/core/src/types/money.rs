//! Money display helpers over decimal arithmetic.
//!
//! Cart and catalog prices are plain [`Decimal`] amounts; currency is a
//! display concern, not part of the persisted data. The shop sells in BRL,
//! so formatting defaults to Brazilian conventions (`R$ 1.234,56`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// ISO 4217 currency codes the storefront can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    BRL,
    USD,
    EUR,
}

/// Error parsing a currency code from text.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown currency code: {0}")]
pub struct ParseCurrencyError(String);

impl CurrencyCode {
    /// Currency symbol used as a display prefix.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::BRL => "R$ ",
            Self::USD => "$",
            Self::EUR => "€",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BRL => "BRL",
            Self::USD => "USD",
            Self::EUR => "EUR",
        }
    }

    /// Format an amount for display, with the currency's grouping and
    /// decimal separators (e.g. `R$ 1.234,56`, `$1,234.56`).
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        let (group_sep, decimal_sep) = match self {
            Self::BRL => ('.', ','),
            Self::USD | Self::EUR => (',', '.'),
        };

        let rendered = format!("{:.2}", amount.round_dp(2));
        let (sign, unsigned) = rendered
            .strip_prefix('-')
            .map_or(("", rendered.as_str()), |rest| ("-", rest));
        let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, digit) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(group_sep);
            }
            grouped.push(digit);
        }

        format!("{sign}{}{grouped}{decimal_sep}{frac_part}", self.symbol())
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = ParseCurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BRL" => Ok(Self::BRL),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            other => Err(ParseCurrencyError(other.to_owned())),
        }
    }
}
