//! Money amounts as returned by the Admin API.
//!
//! Amounts stay strings end to end: the upstream already renders them with
//! the currency's precision, and quotes display them verbatim.

use serde::{Deserialize, Serialize};

/// Monetary amount with currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Decimal amount as string (preserves precision).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Money {
    /// Create a new money amount.
    #[must_use]
    pub fn new(amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency_code: currency_code.into(),
        }
    }

    /// Render as `"<amount> <currencyCode>"`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {}", self.amount, self.currency_code)
    }
}

/// Format an optional total for the quote contract.
#[must_use]
pub fn format_total(money: Option<&Money>) -> Option<String> {
    money.map(Money::display)
}
