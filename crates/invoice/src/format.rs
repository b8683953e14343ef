//! Number, money, and date formatting for printed invoices

use crate::currency::Currency;
use crate::{InvoiceError, Result};
use chrono::NaiveDate;

/// Maximum fraction digits shown for grouped numbers
const MAX_FRACTION_DIGITS: u32 = 3;

/// Format a number with thousand separators, like an en-US locale
///
/// Shows up to three fraction digits and drops trailing zeros.
///
/// # Examples
/// ```
/// use invoice::format_grouped;
/// assert_eq!(format_grouped(1234.5), "1,234.5");
/// assert_eq!(format_grouped(1000000.0), "1,000,000");
/// assert_eq!(format_grouped(0.1 + 0.2), "0.3");
/// ```
pub fn format_grouped(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let abs = n.abs();
    // Large values carry no meaningful fraction digits; scaling them could overflow
    let rounded = if abs < 1e15 {
        let multiplier = 10_f64.powi(MAX_FRACTION_DIGITS as i32);
        (abs * multiplier).round() / multiplier
    } else {
        abs
    };

    // `Display` for f64 prints the shortest round-trip digits without an exponent
    let plain = rounded.to_string();
    let (int_digits, frac_digits) = plain.split_once('.').unwrap_or((plain.as_str(), ""));
    let frac_digits = &frac_digits[..frac_digits.len().min(MAX_FRACTION_DIGITS as usize)];
    let frac_str = frac_digits.trim_end_matches('0');
    let int_str = format_with_thousands(int_digits, ',');

    let sign = if n < 0.0 && rounded > 0.0 { "-" } else { "" };

    if frac_str.is_empty() {
        format!("{sign}{int_str}")
    } else {
        format!("{sign}{int_str}.{frac_str}")
    }
}

/// Format an amount prefixed with the currency code (e.g., "USD 1,250.5")
pub fn format_money(currency: Currency, amount: f64) -> String {
    format!("{} {}", currency.code(), format_grouped(amount))
}

/// Format a quantity as its shortest decimal form (e.g., "2", "1.5")
pub fn format_quantity(quantity: f64) -> String {
    quantity.to_string()
}

/// Format a date as "January 05, 2025"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Parse a `YYYY-MM-DD` date as sent by date inputs
pub fn parse_iso_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| InvoiceError::InvalidDate(text.to_string()))
}

/// Insert thousand separators into a string of integer digits
fn format_with_thousands(digits: &str, sep: char) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(sep);
        }
        result.push(c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(100.0), "100");
        assert_eq!(format_grouped(1234.56), "1,234.56");
        assert_eq!(format_grouped(1000000.0), "1,000,000");
        assert_eq!(format_grouped(-1234567.891), "-1,234,567.891");
    }

    #[test]
    fn test_format_grouped_rounds_to_three_digits() {
        assert_eq!(format_grouped(1.23456), "1.235");
        assert_eq!(format_grouped(0.9999), "1");
        assert_eq!(format_grouped(-0.0001), "0");
    }

    #[test]
    fn test_format_grouped_large_values() {
        assert_eq!(format_grouped(1e20), "100,000,000,000,000,000,000");
        assert_eq!(format_grouped(2e19), "20,000,000,000,000,000,000");
        assert_eq!(format_grouped(-1e20), "-100,000,000,000,000,000,000");
        assert_eq!(format_grouped(123_456_789_012.5), "123,456,789,012.5");
        assert_eq!(format_grouped(f64::MAX).len(), 309 + 102);
    }

    #[test]
    fn test_format_grouped_special() {
        assert_eq!(format_grouped(f64::NAN), "NaN");
        assert_eq!(format_grouped(f64::INFINITY), "∞");
        assert_eq!(format_grouped(f64::NEG_INFINITY), "-∞");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Currency::Usd, 1250.5), "USD 1,250.5");
        assert_eq!(format_money(Currency::Lkr, 100.0), "LKR 100");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(1.5), "1.5");
        assert_eq!(format_quantity(0.0), "0");
    }

    #[test]
    fn test_format_long_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(format_long_date(date), "January 05, 2025");
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            parse_iso_date("2025-01-22").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 22).unwrap()
        );
        assert_eq!(
            parse_iso_date("22/01/2025").unwrap_err(),
            InvoiceError::InvalidDate("22/01/2025".to_string())
        );
        assert!(parse_iso_date("2025-02-30").is_err());
    }

    #[test]
    fn test_format_with_thousands() {
        assert_eq!(format_with_thousands("1000", ','), "1,000");
        assert_eq!(format_with_thousands("1000000", ','), "1,000,000");
        assert_eq!(format_with_thousands("100", ','), "100");
        assert_eq!(format_with_thousands("12345", ','), "12,345");
    }
}
