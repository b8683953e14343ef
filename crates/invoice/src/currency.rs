//! Supported currencies

use crate::{InvoiceError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency label of an invoice
///
/// Only a label: switching currency never converts existing amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Lkr,
    Usd,
    Eur,
    Gbp,
    Aud,
    Inr,
}

/// (currency, code, symbol) in display order
const CURRENCY_TABLE: [(Currency, &str, &str); 6] = [
    (Currency::Lkr, "LKR", "Rs"),
    (Currency::Usd, "USD", "$"),
    (Currency::Eur, "EUR", "€"),
    (Currency::Gbp, "GBP", "£"),
    (Currency::Aud, "AUD", "A$"),
    (Currency::Inr, "INR", "₹"),
];

impl Currency {
    /// Every supported currency, in display order
    pub const ALL: [Currency; 6] = [
        Currency::Lkr,
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Aud,
        Currency::Inr,
    ];

    fn entry(self) -> (Currency, &'static str, &'static str) {
        CURRENCY_TABLE[self as usize]
    }

    /// ISO 4217 code (e.g., "USD")
    pub fn code(self) -> &'static str {
        self.entry().1
    }

    /// Display symbol (e.g., "$")
    pub fn symbol(self) -> &'static str {
        self.entry().2
    }

    /// Look up a currency by its exact code
    pub fn from_code(code: &str) -> Option<Currency> {
        CURRENCY_TABLE
            .iter()
            .find(|(_, c, _)| *c == code)
            .map(|(currency, _, _)| *currency)
    }
}

impl FromStr for Currency {
    type Err = InvoiceError;

    fn from_str(s: &str) -> Result<Self> {
        Currency::from_code(s).ok_or_else(|| InvoiceError::UnknownCurrency(s.to_string()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
