use serde::Serialize;

use crate::core::formatter::{decimal_shift, format_price};

/// Free credits plus token and account balances of a payment account.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    /// Free credits in cents
    pub free_credits: i64,
    /// Token balance as reported by the chain scanner
    #[serde(rename = "coins")]
    raw_coins: String,
    /// Account balance in cents. Covers legacy deposits, monthly token
    /// bonuses and manual adjustments.
    #[serde(rename = "credits")]
    raw_credits: String,
}

impl AccountBalance {
    pub fn new(free_credits: i64, coins: impl Into<String>, credits: impl Into<String>) -> Self {
        Self {
            free_credits,
            raw_coins: coins.into(),
            raw_credits: credits.into(),
        }
    }

    /// Parsed token balance. Non-numeric strings yield `NaN`.
    pub fn coins(&self) -> f64 {
        parse_decimal(&self.raw_coins)
    }

    pub fn sum(&self) -> f64 {
        self.free_credits as f64 + self.coins()
    }

    /// Account credits in dollars, e.g. "$12.34".
    pub fn formatted_credits(&self) -> String {
        format_price(&decimal_shift(&self.raw_credits, 2))
    }

    pub fn has_credits(&self) -> bool {
        parse_decimal(&self.raw_credits) != 0.0
    }
}

impl Default for AccountBalance {
    fn default() -> Self {
        Self::new(0, "0", "0")
    }
}

fn parse_decimal(s: &str) -> f64 {
    s.trim().parse().unwrap_or(f64::NAN)
}
